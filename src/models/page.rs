//! 页面级数据以及逐页、逐图的处理结果
//!
//! 单页或单张图片失败时不抛出，而是作为结果值交给调用方汇总

use crate::error::{AppError, DocumentError};
use crate::models::image::ImageRecord;
use std::fmt::Display;

/// 一页的纯文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 页码（从 0 开始）
    pub page: u32,
    pub text: String,
}

/// 单页处理结果
#[derive(Debug)]
pub enum PageOutcome<T> {
    /// 读取成功
    Read(T),
    /// 该页读取失败，不贡献任何内容
    Failed { page: u32, error: DocumentError },
}

/// 单张图片处理结果
#[derive(Debug)]
pub enum ImageOutcome {
    /// 已写入字节存储并登记
    Saved(ImageRecord),
    /// 该图片被跳过，同页其它图片不受影响
    Failed {
        page: u32,
        index: usize,
        error: AppError,
    },
}

/// 失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    pub page: u32,
    /// 图片序号，页级失败时为空
    pub image_index: Option<usize>,
    pub message: String,
}

impl Display for UnitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.image_index {
            Some(index) => write!(f, "[页 {} 图 {}] {}", self.page, index, self.message),
            None => write!(f, "[页 {}] {}", self.page, self.message),
        }
    }
}

/// 整次运行的逐单元结果汇总
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// 已保存的图片数
    pub images_saved: usize,
    /// 图片提取失败
    pub image_failures: Vec<UnitFailure>,
    /// 图片扫描阶段的页级失败
    pub image_page_failures: Vec<UnitFailure>,
    /// 文本扫描阶段的页级失败
    pub text_page_failures: Vec<UnitFailure>,
}

impl ExtractionReport {
    /// 记录图片扫描阶段的一个结果
    pub fn record_image(&mut self, outcome: &ImageOutcome) {
        match outcome {
            ImageOutcome::Saved(_) => self.images_saved += 1,
            ImageOutcome::Failed { page, index, error } => self.image_failures.push(UnitFailure {
                page: *page,
                image_index: Some(*index),
                message: error.to_string(),
            }),
        }
    }

    /// 记录图片扫描阶段的页级失败
    pub fn record_image_page_failure(&mut self, page: u32, error: &DocumentError) {
        self.image_page_failures.push(UnitFailure {
            page,
            image_index: None,
            message: error.to_string(),
        });
    }

    /// 记录文本扫描阶段的页级失败
    pub fn record_text_page_failure(&mut self, page: u32, error: &DocumentError) {
        self.text_page_failures.push(UnitFailure {
            page,
            image_index: None,
            message: error.to_string(),
        });
    }

    /// 失败总数
    pub fn failure_count(&self) -> usize {
        self.image_failures.len() + self.image_page_failures.len() + self.text_page_failures.len()
    }
}
