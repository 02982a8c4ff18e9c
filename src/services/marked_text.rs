//! 第二遍扫描：逐页读取文本并拼接成带页码、科目标记的全文

use crate::infrastructure::DocumentReader;
use crate::models::{PageOutcome, PageText, Subject};
use crate::services::subject_classifier::SubjectClassifier;
use tracing::warn;

/// 读取所有页面的文本，失败的页面作为 `Failed` 保留在结果中
pub fn read_pages(reader: &dyn DocumentReader) -> Vec<PageOutcome<PageText>> {
    (0..reader.page_count() as u32)
        .map(|page| match reader.page_text(page) {
            Ok(text) => PageOutcome::Read(PageText { page, text }),
            Err(error) => {
                warn!("处理第 {} 页时出错: {}", page, error);
                PageOutcome::Failed { page, error }
            }
        })
        .collect()
}

/// 带 `[PAGINA:n]` / `[MATERIA:科目]` 标记的全文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedText {
    text: String,
    /// 扫描完所有页面后的“当前科目”
    last_subject: Option<Subject>,
}

impl MarkedText {
    /// 按页序拼接；读取失败的页不贡献任何内容
    ///
    /// 当前科目随页面推进更新，每页的科目标记反映扫描到该页时的科目
    pub fn build<'a>(
        pages: impl IntoIterator<Item = &'a PageOutcome<PageText>>,
        classifier: &SubjectClassifier,
    ) -> Self {
        let mut text = String::new();
        let mut current: Option<Subject> = None;

        for outcome in pages {
            let PageOutcome::Read(page) = outcome else {
                continue;
            };
            current = classifier.classify(&page.text, current);

            text.push_str(&page_marker(page.page));
            if let Some(subject) = current {
                text.push_str(&subject_marker(subject));
            }
            text.push_str(&page.text);
        }

        Self {
            text,
            last_subject: current,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn last_subject(&self) -> Option<Subject> {
        self.last_subject
    }
}

/// 页码标记（前后各带换行，保证下一行的题号位于行首）
pub fn page_marker(page: u32) -> String {
    format!("\n[PAGINA:{}]\n", page)
}

/// 科目标记
pub fn subject_marker(subject: Subject) -> String {
    format!("[MATERIA:{}]\n", subject.label())
}
