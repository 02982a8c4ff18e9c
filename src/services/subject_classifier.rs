//! 科目识别 - 按关键词表判断一段文本属于哪个科目

use crate::models::{Subject, SUBJECT_KEYWORDS};
use regex::Regex;

/// 科目识别器
///
/// 对关键词表中的每个词做不区分大小写的整词匹配，按表中顺序取第一个命中的科目
#[derive(Debug, Clone)]
pub struct SubjectClassifier {
    patterns: Vec<(Subject, Regex)>,
}

impl SubjectClassifier {
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = SUBJECT_KEYWORDS
            .entries()
            .map(|(keyword, subject)| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))).map(|re| (*subject, re))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// 返回第一个命中的科目；都没命中时返回 `fallback`
    pub fn classify(&self, text: &str, fallback: Option<Subject>) -> Option<Subject> {
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(subject, _)| *subject)
            .or(fallback)
    }
}
