//! # Question Extractor
//!
//! 从考试 PDF 中提取结构化题目的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `DocumentReader` / `PdfDocument` - 逐页读取文本和嵌入图片
//! - `ByteStore` / `FsByteStore` - 保存图片字节
//! - `save_json` / `load_json` - 题目集合的 JSON 输出
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述“我能做什么”
//! - `SubjectClassifier` - 按关键词识别科目
//! - `ImageIndex` - 页码 → 图片
//! - `QuestionSegmenter` - 按行首题号切分
//! - `QuestionStructurer` - 指令、题干、选项、题型、公式、配图
//! - `assemble` - 过滤并排序
//!
//! ### ③ 流程层（Workflow）
//! - `ExtractionFlow` - 两遍扫描 → 切分 → 结构化 → 汇总
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 打开 PDF、执行流程、写出 JSON、输出统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ByteStore, DocumentReader, FsByteStore, PdfDocument};
pub use models::{QuestionCollection, QuestionRecord, Subject};
pub use orchestrator::App;
pub use workflow::{ExtractionFlow, ExtractionOutcome};
