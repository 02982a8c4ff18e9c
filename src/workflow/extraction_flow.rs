//! 提取流程 - 流程层
//!
//! 流程顺序：
//! 1. 第一遍：逐页提取图片，建立图片索引
//! 2. 第二遍：逐页读取文本，拼接带页码、科目标记的全文
//! 3. 切分题目
//! 4. 逐题结构化（科目、指令、题干、选项、题型、公式、配图）
//! 5. 汇总排序
//!
//! 单页、单张图片的失败只记录在报告里，不中断流程

use crate::error::AppResult;
use crate::infrastructure::{ByteStore, DocumentReader};
use crate::models::{ExtractionReport, PageOutcome, QuestionCollection, QuestionRecord};
use crate::services::{
    assemble, read_pages, ImageIndex, MarkedText, QuestionSegmenter, QuestionStructurer,
    SubjectClassifier,
};
use crate::utils::logging::truncate_text;
use tracing::info;

/// 一次提取的结果
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub collection: QuestionCollection,
    pub report: ExtractionReport,
}

/// 提取流程
///
/// - 不持有文档和存储，只在 `run` 时借用
/// - 正则在创建时编译一次
pub struct ExtractionFlow {
    classifier: SubjectClassifier,
    segmenter: QuestionSegmenter,
    verbose_logging: bool,
}

impl ExtractionFlow {
    pub fn new(verbose_logging: bool) -> AppResult<Self> {
        Ok(Self {
            classifier: SubjectClassifier::new()?,
            segmenter: QuestionSegmenter::new()?,
            verbose_logging,
        })
    }

    pub fn run(&self, reader: &dyn DocumentReader, store: &dyn ByteStore) -> AppResult<ExtractionOutcome> {
        let mut report = ExtractionReport::default();

        // ========== 第一遍：图片 ==========
        info!("🖼️ 正在提取图片 (共 {} 页)...", reader.page_count());
        let (index, image_pages) = ImageIndex::build(reader, store);
        for outcome in &image_pages {
            match outcome {
                PageOutcome::Read(images) => images.iter().for_each(|image| report.record_image(image)),
                PageOutcome::Failed { page, error } => report.record_image_page_failure(*page, error),
            }
        }
        info!("✓ 共提取 {} 张图片", index.total_images());

        // ========== 第二遍：文本 ==========
        info!("📄 正在读取文本...");
        let pages = read_pages(reader);
        for outcome in &pages {
            if let PageOutcome::Failed { page, error } = outcome {
                report.record_text_page_failure(*page, error);
            }
        }
        let marked = MarkedText::build(&pages, &self.classifier);

        // ========== 切分与结构化 ==========
        let raw_questions = self.segmenter.segment(marked.as_str());
        let structurer = QuestionStructurer::new(&self.classifier, &index, marked.last_subject())?;

        let records: Vec<QuestionRecord> = raw_questions
            .iter()
            .map(|raw| {
                let record = structurer.structure(raw);
                self.log_enunciation(&record);
                record
            })
            .collect();

        Ok(ExtractionOutcome {
            collection: assemble(records),
            report,
        })
    }

    fn log_enunciation(&self, record: &QuestionRecord) {
        if self.verbose_logging {
            info!("    题干: {}", truncate_text(&record.enunciation, 80));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocumentError;
    use crate::infrastructure::{EmbeddedImage, ImagePayload, MemoryByteStore};
    use crate::models::{BoundingBox, QuestionType, Subject};

    /// 每页一段文本，可选地带一张图片
    struct FakeReader {
        pages: Vec<(&'static str, bool)>,
    }

    impl DocumentReader for FakeReader {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_text(&self, page: u32) -> Result<String, DocumentError> {
            Ok(self.pages[page as usize].0.to_string())
        }

        fn page_images(&self, page: u32) -> Result<Vec<EmbeddedImage>, DocumentError> {
            Ok(if self.pages[page as usize].1 {
                vec![EmbeddedImage {
                    object: (page + 10, 0),
                    name: "Im0".to_string(),
                }]
            } else {
                Vec::new()
            })
        }

        fn image_payload(&self, _image: &EmbeddedImage) -> Result<ImagePayload, DocumentError> {
            Ok(ImagePayload {
                bytes: vec![0xFF, 0xD8, 0xFF],
                ext: "jpeg".to_string(),
            })
        }

        fn image_rects(&self, _page: u32, _image: &EmbeddedImage) -> Result<Vec<BoundingBox>, DocumentError> {
            Ok(vec![BoundingBox::new(0.0, 0.0, 10.0, 10.0)])
        }
    }

    #[test]
    fn test_two_pass_flow() {
        let reader = FakeReader {
            pages: vec![
                ("FÍSICA\n1. Observe a figura e responda.\n(A) um\n(B) dois\n", true),
                ("\n2. Calcule x^2 para x = 3.\n(A) 6\n(B) 9\n", false),
            ],
        };
        let store = MemoryByteStore::new("imagens");

        let outcome = ExtractionFlow::new(false).unwrap().run(&reader, &store).unwrap();
        let questions = outcome.collection.questions();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].subject, Some(Subject::Physics));
        assert_eq!(questions[1].subject, Some(Subject::Physics));
        assert!(questions[0].has_image);
        assert_eq!(questions[0].images[0].file, "page0_img0.jpeg");
        assert_eq!(questions[1].question_type, QuestionType::Calculation);
        assert!(questions[1].formulas.contains("x^2"));
        assert_eq!(outcome.report.images_saved, 1);
        assert_eq!(outcome.report.failure_count(), 0);
        assert_eq!(store.names(), vec!["page0_img0.jpeg".to_string()]);
    }
}
