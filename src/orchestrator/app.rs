//! 应用入口 - 编排层
//!
//! 1. **应用初始化**：打开 PDF、准备图片存储
//! 2. **执行流程**：委托 `ExtractionFlow` 完成两遍扫描
//! 3. **输出结果**：写出 JSON 并打印统计
//!
//! 只有文档打不开、结果写不出去才算整次运行失败

use crate::config::Config;
use crate::error::DocumentError;
use crate::infrastructure::{save_json, FsByteStore, PdfDocument};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::ExtractionFlow;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info};

/// 应用主结构
pub struct App {
    config: Config,
    document: PdfDocument,
    store: FsByteStore,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let document = match PdfDocument::open(&config.pdf_path) {
            Ok(document) => document,
            Err(e) => {
                if let DocumentError::NotFound { .. } = e {
                    report_missing_pdf(&config.pdf_path);
                }
                return Err(e.into());
            }
        };
        info!("✓ PDF 已打开");

        let store = FsByteStore::new(&config.image_dir);

        Ok(Self {
            config,
            document,
            store,
        })
    }

    /// 运行应用主逻辑
    pub fn run(&self) -> Result<()> {
        let flow = ExtractionFlow::new(self.config.verbose_logging)?;
        let outcome = flow.run(&self.document, &self.store)?;

        save_json(&outcome.collection, &self.config.output_json)
            .with_context(|| format!("写出 {} 失败", self.config.output_json))?;

        print_final_stats(&outcome.collection, &outcome.report, &self.config);
        Ok(())
    }
}

/// 找不到 PDF 时提示当前目录和期望的文件名
fn report_missing_pdf(pdf_path: &str) {
    error!("❌ 找不到 PDF 文件: {}", pdf_path);
    match std::env::current_dir() {
        Ok(dir) => error!("当前目录: {}", dir.display()),
        Err(e) => error!("无法获取当前目录: {}", e),
    }
    let expected = Path::new(pdf_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf_path.to_string());
    error!("请确认文件 {} 位于当前目录，或通过 PDF_PATH 指定路径", expected);
}
