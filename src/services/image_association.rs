//! 图片关联 - 题目正文提到图表时，从所在页起向后查找图片

use crate::models::ImageRecord;
use crate::services::image_index::ImageIndex;
use regex::Regex;
use tracing::debug;

/// 提示“有配图”的词（不区分大小写，子串匹配）
pub const REFERENCE_CUES: [&str; 10] = [
    "figura",
    "imagem",
    "gráfico",
    "tabela",
    "diagrama",
    "ilustração",
    "quadro",
    "mapa",
    "inf",
    "chart",
];

/// 从当前页起连续查找的页数（含当前页）
pub const IMAGE_WINDOW_PAGES: u32 = 5;

/// 每道题最多关联的图片数
pub const MAX_IMAGES_PER_QUESTION: usize = 2;

/// 图片关联器
#[derive(Debug, Clone)]
pub struct ImageAssociator {
    cue: Regex,
}

impl ImageAssociator {
    pub fn new() -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = REFERENCE_CUES.iter().map(|cue| regex::escape(cue)).collect();
        Ok(Self {
            cue: Regex::new(&format!("(?i){}", alternatives.join("|")))?,
        })
    }

    /// 正文是否含有配图提示词
    pub fn has_reference_cue(&self, body: &str) -> bool {
        self.cue.is_match(body)
    }

    /// 查找题目关联的图片（0~2 张）
    ///
    /// 没有提示词时直接返回空；否则从 `current_page` 开始向后查找，
    /// 遇到第一页有图片的页面就取该页的图片并停止
    pub fn associate<'a>(
        &self,
        index: &'a ImageIndex,
        number: u32,
        body: &str,
        current_page: Option<u32>,
        next_number: Option<u32>,
    ) -> Vec<&'a ImageRecord> {
        if !self.has_reference_cue(body) {
            return Vec::new();
        }
        let Some(current_page) = current_page else {
            debug!("题目 {} 有配图提示但无法确定页码", number);
            return Vec::new();
        };

        let window = current_page..current_page.saturating_add(IMAGE_WINDOW_PAGES);
        debug!(
            "题目 {} 在第 {}..{} 页查找图片 (下一题: {:?})",
            number, window.start, window.end, next_number
        );

        window
            .map(|page| index.images_on(page))
            .find(|images| !images.is_empty())
            .map(|images| images.iter().take(MAX_IMAGES_PER_QUESTION).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(page: u32, index: usize) -> ImageRecord {
        ImageRecord {
            file: ImageRecord::file_name(page, index, "jpeg"),
            path: ImageRecord::file_name(page, index, "jpeg"),
            page,
            index,
            bbox: None,
            format: "jpeg".to_string(),
        }
    }

    fn associator() -> ImageAssociator {
        ImageAssociator::new().unwrap()
    }

    #[test]
    fn test_no_cue_never_searches() {
        let index = ImageIndex::from_records(vec![record(3, 0)]);
        let found = associator().associate(&index, 10, "Calcule o valor de x.", Some(3), Some(11));
        assert!(found.is_empty());
    }

    #[test]
    fn test_first_page_with_images_wins() {
        let index = ImageIndex::from_records(vec![
            record(5, 0),
            record(5, 1),
            record(5, 2),
            record(6, 0),
        ]);
        let found = associator().associate(&index, 1, "Observe a FIGURA abaixo.", Some(5), None);

        let files: Vec<&str> = found.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, vec!["page5_img0.jpeg", "page5_img1.jpeg"]);
    }

    #[test]
    fn test_window_skips_empty_pages() {
        let index = ImageIndex::from_records(vec![record(7, 0), record(9, 0)]);
        let found = associator().associate(&index, 1, "Veja o gráfico", Some(4), None);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].page, 7);
    }

    #[test]
    fn test_window_is_five_pages() {
        let index = ImageIndex::from_records(vec![record(5, 0)]);
        assert!(associator().associate(&index, 1, "o mapa", Some(0), None).is_empty());
        assert_eq!(associator().associate(&index, 1, "o mapa", Some(1), None).len(), 1);
    }

    #[test]
    fn test_unknown_page_yields_nothing() {
        let index = ImageIndex::from_records(vec![record(0, 0)]);
        assert!(associator().associate(&index, 1, "tabela", None, None).is_empty());
    }

    #[test]
    fn test_cue_is_substring_match() {
        // "inf" aparece dentro de "informações"
        assert!(associator().has_reference_cue("Com base nas informações"));
        assert!(!associator().has_reference_cue("Resolva a equação"));
    }
}
