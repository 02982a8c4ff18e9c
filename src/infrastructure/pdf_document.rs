//! 基于 lopdf 的 PDF 读取器
//!
//! 对外页码从 0 开始；lopdf 的页码从 1 开始，这里统一换算

use crate::error::DocumentError;
use crate::infrastructure::document::{DocumentReader, EmbeddedImage, ImagePayload};
use crate::models::BoundingBox;
use image::ImageEncoder;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// 没有 MediaBox 时使用的页面高度（US Letter）
const DEFAULT_PAGE_HEIGHT: f64 = 792.0;

/// 原样保存的压缩格式：(过滤器, 扩展名)
const PASSTHROUGH_FILTERS: [(&str, &str); 3] = [
    ("DCTDecode", "jpeg"),
    ("JPXDecode", "jpx"),
    ("JBIG2Decode", "jb2"),
];

/// 变换矩阵 [a b c d e f]
type Matrix = [f64; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// 已加载的 PDF 文档
pub struct PdfDocument {
    inner: Document,
    /// 按页序缓存的页面对象编号
    page_ids: Vec<ObjectId>,
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

impl PdfDocument {
    /// 打开 PDF，路径不是已存在的文件时返回 `NotFound`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DocumentError::NotFound {
                path: path.display().to_string(),
            });
        }

        let inner = Document::load(path).map_err(|source| DocumentError::LoadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let page_ids: Vec<ObjectId> = inner.get_pages().values().copied().collect();
        debug!("已加载 {}，共 {} 页", path.display(), page_ids.len());

        Ok(Self { inner, page_ids })
    }

    fn page_id(&self, page: u32) -> Result<ObjectId, DocumentError> {
        self.page_ids
            .get(page as usize)
            .copied()
            .ok_or(DocumentError::PageNotFound {
                page,
                page_count: self.page_ids.len(),
            })
    }

    /// 解引用间接对象
    fn resolve<'a>(&'a self, object: &'a Object) -> lopdf::Result<&'a Object> {
        match object {
            Object::Reference(id) => self.inner.get_object(*id),
            other => Ok(other),
        }
    }

    /// 在页面字典中查找 key，找不到时沿 /Parent 向上查找
    fn inherited(&self, page_id: ObjectId, key: &[u8]) -> lopdf::Result<Option<&Object>> {
        let mut current = page_id;
        loop {
            let dict = self.inner.get_object(current)?.as_dict()?;
            if let Ok(value) = dict.get(key) {
                return Ok(Some(self.resolve(value)?));
            }
            match dict.get(b"Parent") {
                Ok(parent) => current = parent.as_reference()?,
                Err(_) => return Ok(None),
            }
        }
    }

    /// 页面的 /XObject 资源字典
    fn xobjects(&self, page: u32, page_id: ObjectId) -> Result<Option<&Dictionary>, DocumentError> {
        let structure_error = |e: lopdf::Error| DocumentError::PageStructure {
            page,
            reason: e.to_string(),
        };

        let Some(resources) = self.inherited(page_id, b"Resources").map_err(structure_error)? else {
            return Ok(None);
        };
        let resources = resources.as_dict().map_err(structure_error)?;
        match resources.get(b"XObject") {
            Ok(xobjects) => {
                let dict = self
                    .resolve(xobjects)
                    .and_then(|o| o.as_dict())
                    .map_err(structure_error)?;
                Ok(Some(dict))
            }
            Err(_) => Ok(None),
        }
    }

    fn page_height(&self, page_id: ObjectId) -> f64 {
        let media_box = self
            .inherited(page_id, b"MediaBox")
            .ok()
            .flatten()
            .and_then(|o| o.as_array().ok());
        match media_box {
            Some(values) if values.len() == 4 => {
                match (object_to_f64(&values[1]), object_to_f64(&values[3])) {
                    (Some(y0), Some(y1)) => (y1 - y0).abs(),
                    _ => DEFAULT_PAGE_HEIGHT,
                }
            }
            _ => DEFAULT_PAGE_HEIGHT,
        }
    }

    fn image_stream(&self, image: &EmbeddedImage) -> Result<&Stream, DocumentError> {
        self.inner
            .get_object(image.object)
            .and_then(|o| o.as_stream())
            .map_err(|e| DocumentError::ImageResolve {
                object: image.object,
                reason: e.to_string(),
            })
    }

    /// 过滤器名称列表（/Filter 可以是单个名字或数组）
    fn filters(&self, dict: &Dictionary) -> Vec<String> {
        let Ok(filter) = dict.get(b"Filter").and_then(|o| self.resolve(o)) else {
            return Vec::new();
        };
        match filter {
            Object::Name(name) => vec![String::from_utf8_lossy(name).into_owned()],
            Object::Array(items) => items
                .iter()
                .filter_map(|item| item.as_name().ok())
                .map(|name| String::from_utf8_lossy(name).into_owned())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// 每个像素的分量数
    fn color_components(&self, dict: &Dictionary) -> Option<u8> {
        let color_space = self.resolve(dict.get(b"ColorSpace").ok()?).ok()?;
        match color_space {
            Object::Name(name) => match name.as_slice() {
                b"DeviceGray" | b"CalGray" => Some(1),
                b"DeviceRGB" | b"CalRGB" => Some(3),
                _ => None,
            },
            Object::Array(items) if items.len() == 2 && items[0].as_name().ok() == Some(b"ICCBased".as_slice()) => {
                let profile = self.resolve(&items[1]).ok()?.as_stream().ok()?;
                match profile.dict.get(b"N").ok()?.as_i64().ok()? {
                    1 => Some(1),
                    3 => Some(3),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// 把未压缩成图片格式的采样数据重新编码为 PNG
    fn encode_png(&self, image: &EmbeddedImage, stream: &Stream) -> Result<ImagePayload, DocumentError> {
        let unsupported = |reason: String| DocumentError::UnsupportedImage {
            object: image.object,
            reason,
        };

        let dict = &stream.dict;
        let width = dict.get(b"Width").and_then(|o| o.as_i64()).unwrap_or(0);
        let height = dict.get(b"Height").and_then(|o| o.as_i64()).unwrap_or(0);
        if width <= 0 || height <= 0 {
            return Err(unsupported(format!("尺寸无效 {}x{}", width, height)));
        }
        let bits = dict.get(b"BitsPerComponent").and_then(|o| o.as_i64()).unwrap_or(8);
        if bits != 8 {
            return Err(unsupported(format!("BitsPerComponent = {}", bits)));
        }
        let color_type = match self.color_components(dict) {
            Some(1) => image::ExtendedColorType::L8,
            Some(3) => image::ExtendedColorType::Rgb8,
            _ => return Err(unsupported("色彩空间不支持".to_string())),
        };
        let channels: usize = if color_type == image::ExtendedColorType::L8 { 1 } else { 3 };

        let samples = if dict.has(b"Filter") {
            stream
                .decompressed_content()
                .map_err(|e| unsupported(format!("解压失败: {}", e)))?
        } else {
            stream.content.clone()
        };

        let expected = width as usize * height as usize * channels;
        if samples.len() < expected {
            return Err(unsupported(format!(
                "采样数据长度 {} 小于 {}",
                samples.len(),
                expected
            )));
        }

        let mut bytes = Vec::new();
        image::codecs::png::PngEncoder::new(&mut bytes)
            .write_image(&samples[..expected], width as u32, height as u32, color_type)
            .map_err(|source| DocumentError::Encode {
                object: image.object,
                source,
            })?;

        Ok(ImagePayload {
            bytes,
            ext: "png".to_string(),
        })
    }
}

impl DocumentReader for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_text(&self, page: u32) -> Result<String, DocumentError> {
        self.page_id(page)?;
        self.inner
            .extract_text(&[page + 1])
            .map_err(|source| DocumentError::PageText { page, source })
    }

    fn page_images(&self, page: u32) -> Result<Vec<EmbeddedImage>, DocumentError> {
        let page_id = self.page_id(page)?;
        let Some(xobjects) = self.xobjects(page, page_id)? else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        let mut images = Vec::new();
        for (name, object) in xobjects.iter() {
            let Ok(id) = object.as_reference() else {
                continue;
            };
            let Ok(stream) = self.inner.get_object(id).and_then(|o| o.as_stream()) else {
                continue;
            };
            let is_image = stream
                .dict
                .get(b"Subtype")
                .and_then(|o| o.as_name())
                .map(|subtype| subtype == b"Image")
                .unwrap_or(false);
            if is_image && seen.insert(id) {
                images.push(EmbeddedImage {
                    object: id,
                    name: String::from_utf8_lossy(name).into_owned(),
                });
            }
        }

        Ok(images)
    }

    fn image_payload(&self, image: &EmbeddedImage) -> Result<ImagePayload, DocumentError> {
        let stream = self.image_stream(image)?;
        let filters = self.filters(&stream.dict);

        if let [only] = filters.as_slice() {
            if let Some((_, ext)) = PASSTHROUGH_FILTERS.iter().find(|(name, _)| name == only) {
                return Ok(ImagePayload {
                    bytes: stream.content.clone(),
                    ext: ext.to_string(),
                });
            }
        }
        if filters
            .iter()
            .any(|f| PASSTHROUGH_FILTERS.iter().any(|(name, _)| name == f))
        {
            return Err(DocumentError::UnsupportedImage {
                object: image.object,
                reason: format!("过滤器组合 {:?}", filters),
            });
        }

        self.encode_png(image, stream)
    }

    fn image_rects(&self, page: u32, image: &EmbeddedImage) -> Result<Vec<BoundingBox>, DocumentError> {
        let page_id = self.page_id(page)?;
        let structure_error = |e: lopdf::Error| DocumentError::PageStructure {
            page,
            reason: e.to_string(),
        };

        let raw = self.inner.get_page_content(page_id).map_err(structure_error)?;
        let content = Content::decode(&raw).map_err(structure_error)?;
        let page_height = self.page_height(page_id);

        let mut ctm = IDENTITY;
        let mut saved = Vec::new();
        let mut rects = Vec::new();
        for operation in &content.operations {
            match operation.operator.as_str() {
                "q" => saved.push(ctm),
                "Q" => {
                    if let Some(previous) = saved.pop() {
                        ctm = previous;
                    }
                }
                "cm" => {
                    if let Some(m) = matrix_from_operands(&operation.operands) {
                        ctm = multiply(&m, &ctm);
                    }
                }
                "Do" => {
                    let target = operation.operands.first().and_then(|o| o.as_name().ok());
                    if target == Some(image.name.as_bytes()) {
                        rects.push(unit_square_bbox(&ctm, page_height));
                    }
                }
                _ => {}
            }
        }

        Ok(rects)
    }
}

fn object_to_f64(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some(*f as f64),
        _ => None,
    }
}

fn matrix_from_operands(operands: &[Object]) -> Option<Matrix> {
    if operands.len() != 6 {
        return None;
    }
    let mut m = [0.0; 6];
    for (slot, operand) in m.iter_mut().zip(operands) {
        *slot = object_to_f64(operand)?;
    }
    Some(m)
}

/// m × n
fn multiply(m: &Matrix, n: &Matrix) -> Matrix {
    [
        m[0] * n[0] + m[1] * n[2],
        m[0] * n[1] + m[1] * n[3],
        m[2] * n[0] + m[3] * n[2],
        m[2] * n[1] + m[3] * n[3],
        m[4] * n[0] + m[5] * n[2] + n[4],
        m[4] * n[1] + m[5] * n[3] + n[5],
    ]
}

/// 图片占据单位正方形，经 CTM 变换后换成左上角原点的矩形
fn unit_square_bbox(ctm: &Matrix, page_height: f64) -> BoundingBox {
    let corners = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
    let points: Vec<(f64, f64)> = corners
        .iter()
        .map(|&(x, y)| {
            (
                ctm[0] * x + ctm[2] * y + ctm[4],
                ctm[1] * x + ctm[3] * y + ctm[5],
            )
        })
        .collect();

    let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    BoundingBox::new(min_x, page_height - max_y, max_x, page_height - min_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_translate_after_scale() {
        let scale = [200.0, 0.0, 0.0, 150.0, 0.0, 0.0];
        let translate = [1.0, 0.0, 0.0, 1.0, 100.0, 300.0];
        let ctm = multiply(&scale, &translate);
        assert_eq!(ctm, [200.0, 0.0, 0.0, 150.0, 100.0, 300.0]);
    }

    #[test]
    fn test_unit_square_flips_to_top_left_origin() {
        let ctm = [200.0, 0.0, 0.0, 150.0, 100.0, 300.0];
        let bbox = unit_square_bbox(&ctm, 792.0);
        assert_eq!(bbox, BoundingBox::new(100.0, 342.0, 300.0, 492.0));
    }

    #[test]
    fn test_matrix_needs_six_numbers() {
        assert!(matrix_from_operands(&[Object::Integer(1)]).is_none());
        let ops: Vec<Object> = vec![1.into(), 0.into(), 0.into(), 1.into(), Object::Real(2.5), 3.into()];
        assert_eq!(matrix_from_operands(&ops), Some([1.0, 0.0, 0.0, 1.0, 2.5, 3.0]));
    }

    #[test]
    fn test_open_missing_file_is_not_found() {
        let err = PdfDocument::open("definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, DocumentError::NotFound { .. }));
    }
}
