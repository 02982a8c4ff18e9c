//! 图片索引 - 第一遍扫描：提取所有页面的图片并按页登记

use crate::error::AppError;
use crate::infrastructure::{ByteStore, DocumentReader, EmbeddedImage};
use crate::models::{ImageOutcome, ImageRecord, PageOutcome};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// 页码 → 该页图片
///
/// 构建完成后只读
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageIndex {
    pages: BTreeMap<u32, Vec<ImageRecord>>,
}

impl ImageIndex {
    /// 遍历所有页面，保存图片字节并建立索引
    ///
    /// 单张图片失败只跳过该图片；整页失败时该页登记为零张图片
    pub fn build(
        reader: &dyn DocumentReader,
        store: &dyn ByteStore,
    ) -> (Self, Vec<PageOutcome<Vec<ImageOutcome>>>) {
        let mut index = Self::default();
        let mut outcomes = Vec::with_capacity(reader.page_count());

        for page in 0..reader.page_count() as u32 {
            let images = match reader.page_images(page) {
                Ok(images) => images,
                Err(error) => {
                    warn!("处理第 {} 页图片时出错: {}", page, error);
                    index.pages.insert(page, Vec::new());
                    outcomes.push(PageOutcome::Failed { page, error });
                    continue;
                }
            };

            let page_outcomes: Vec<ImageOutcome> = images
                .iter()
                .enumerate()
                .map(|(i, image)| extract_one(reader, store, page, i, image))
                .collect();

            let records = page_outcomes
                .iter()
                .filter_map(|outcome| match outcome {
                    ImageOutcome::Saved(record) => Some(record.clone()),
                    ImageOutcome::Failed { .. } => None,
                })
                .collect();
            index.pages.insert(page, records);
            outcomes.push(PageOutcome::Read(page_outcomes));
        }

        (index, outcomes)
    }

    /// 直接由记录构建（页码取自记录本身）
    pub fn from_records(records: impl IntoIterator<Item = ImageRecord>) -> Self {
        let mut pages: BTreeMap<u32, Vec<ImageRecord>> = BTreeMap::new();
        for record in records {
            pages.entry(record.page).or_default().push(record);
        }
        Self { pages }
    }

    /// 某页的图片（没有登记的页返回空）
    pub fn images_on(&self, page: u32) -> &[ImageRecord] {
        self.pages.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 已登记的页数
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 图片总数
    pub fn total_images(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }
}

/// 提取并保存单张图片
fn extract_one(
    reader: &dyn DocumentReader,
    store: &dyn ByteStore,
    page: u32,
    index: usize,
    image: &EmbeddedImage,
) -> ImageOutcome {
    match save_image(reader, store, page, index, image) {
        Ok(record) => {
            info!("✓ 图片已提取: {}", record.file);
            ImageOutcome::Saved(record)
        }
        Err(error) => {
            warn!("提取第 {} 页第 {} 张图片时出错: {}", page, index, error);
            ImageOutcome::Failed { page, index, error }
        }
    }
}

fn save_image(
    reader: &dyn DocumentReader,
    store: &dyn ByteStore,
    page: u32,
    index: usize,
    image: &EmbeddedImage,
) -> Result<ImageRecord, AppError> {
    let payload = reader.image_payload(image)?;
    let bbox = reader.image_rects(page, image)?.into_iter().next();
    let file = ImageRecord::file_name(page, index, &payload.ext);
    let path = store.store(&file, &payload.bytes)?;

    Ok(ImageRecord {
        file,
        path: path.display().to_string(),
        page,
        index,
        bbox,
        format: payload.ext,
    })
}
