//! 文档读取能力
//!
//! 核心流程只依赖这个 trait，不关心底层是哪个 PDF 库

use crate::error::DocumentError;
use crate::models::BoundingBox;

/// 页面上的一张嵌入图片（文档内部引用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// 图片对象编号
    pub object: (u32, u16),
    /// 页面资源中的名字，例如 `Im0`
    pub name: String,
}

/// 图片字节及其格式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    /// 扩展名：jpeg / png / jpx / jb2
    pub ext: String,
}

/// 分页文档读取器
pub trait DocumentReader {
    /// 页数
    fn page_count(&self) -> usize;

    /// 提取某页纯文本
    fn page_text(&self, page: u32) -> Result<String, DocumentError>;

    /// 按文档顺序列出某页的嵌入图片
    fn page_images(&self, page: u32) -> Result<Vec<EmbeddedImage>, DocumentError>;

    /// 解析图片字节和格式
    fn image_payload(&self, image: &EmbeddedImage) -> Result<ImagePayload, DocumentError>;

    /// 图片在该页上的放置位置（按页面绘制顺序，可能为空）
    fn image_rects(&self, page: u32, image: &EmbeddedImage) -> Result<Vec<BoundingBox>, DocumentError>;
}
