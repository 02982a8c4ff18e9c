use serde::{Deserialize, Serialize};

/// 图片在页面上的位置（左上角为原点，单位：pt）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }
}

/// 图片索引中的一条记录
///
/// 只由图片索引持有，创建后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// 文件名，形如 `page3_img0.jpeg`
    #[serde(rename = "arquivo")]
    pub file: String,
    /// 实际写入的路径
    #[serde(rename = "caminho")]
    pub path: String,
    /// 所在页（从 0 开始）
    #[serde(rename = "pagina")]
    pub page: u32,
    /// 页内序号（从 0 开始）
    #[serde(rename = "index")]
    pub index: usize,
    /// 第一个放置位置，没有放置时为空
    pub bbox: Option<BoundingBox>,
    /// 扩展名（jpeg / png / jpx ...）
    #[serde(rename = "formato")]
    pub format: String,
}

impl ImageRecord {
    /// 图片的确定性文件名
    pub fn file_name(page: u32, index: usize, ext: &str) -> String {
        format!("page{}_img{}.{}", page, index, ext)
    }
}

/// 题目对图片的引用（只保留文件、页码和格式）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(rename = "arquivo")]
    pub file: String,
    #[serde(rename = "caminho")]
    pub path: String,
    #[serde(rename = "pagina")]
    pub page: u32,
    #[serde(rename = "formato")]
    pub format: String,
}

impl From<&ImageRecord> for ImageRef {
    fn from(record: &ImageRecord) -> Self {
        Self {
            file: record.file.clone(),
            path: record.path.clone(),
            page: record.page,
            format: record.format.clone(),
        }
    }
}
