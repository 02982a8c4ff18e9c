//! 题目结构化 - 把切分出的原始题目整理成完整记录
//!
//! 每个子步骤都可以单独调用：指令、题干、选项、题型、公式、配图。
//! 任何一步找不到内容都不算错误，对应字段留空即可。

use crate::models::{ImageRef, QuestionOption, QuestionRecord, QuestionType, RawQuestion, Subject};
use crate::services::image_association::ImageAssociator;
use crate::services::image_index::ImageIndex;
use crate::services::subject_classifier::SubjectClassifier;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::info;

/// 超过这个字符数（且不是判断题、计算题）的题目视为阅读理解
const TEXT_INTERPRETATION_CHARS: usize = 800;

/// 结构化所用的正则
#[derive(Debug, Clone)]
pub struct StructurePatterns {
    page_marker: Regex,
    instruction_label: Regex,
    option_start: Regex,
    line_citation: Regex,
    option_marker: Regex,
    true_false: Regex,
    calculation: Regex,
    formulas: [Regex; 4],
}

impl StructurePatterns {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            page_marker: Regex::new(r"\[PAGINA:([0-9]+)\]")?,
            instruction_label: Regex::new(r"(?i)instrução:")?,
            option_start: Regex::new(r"\n\s*\([A-E]\)")?,
            line_citation: Regex::new(r"l\.\s*[0-9]+")?,
            option_marker: Regex::new(r"\(([A-F])\)")?,
            true_false: Regex::new(r"\([VF]\)")?,
            calculation: Regex::new(r"[∫∑∏√±×÷≤≥≠∞]|frac|sqrt|\^")?,
            formulas: [
                Regex::new(r"\b[a-z]\^[0-9]")?,
                Regex::new(r"\\frac\{.+?\}\{.+?\}")?,
                Regex::new(r"\\sqrt\{.+?\}")?,
                Regex::new(r"∫.+?d[xyz]")?,
            ],
        })
    }

    /// 上下文中最后一个 `[PAGINA:n]` 的页码
    pub fn page_from_context(&self, context: &str) -> Option<u32> {
        self.page_marker
            .captures_iter(context)
            .last()
            .and_then(|caps| caps.get(1)?.as_str().parse().ok())
    }

    /// 指令：标签之后到下一个 “换行 + (” 或结尾
    pub fn instruction(&self, body: &str) -> Option<String> {
        let label = self.instruction_label.find(body)?;
        let rest = &body[label.end()..];
        let content = rest.trim_start();
        // 至少保留一个字符，再找结束位置
        let first_len = content.chars().next()?.len_utf8();
        let end = content[first_len..]
            .find("\n(")
            .map(|pos| pos + first_len)
            .unwrap_or(content.len());
        let instruction = content[..end].trim();
        (!instruction.is_empty()).then(|| instruction.to_string())
    }

    /// 去掉所有指令片段（标签到下一个 “换行 + (” 或结尾）
    fn strip_instructions(&self, body: &str) -> String {
        let mut cleaned = String::with_capacity(body.len());
        let mut cursor = 0;
        while let Some(label) = self.instruction_label.find_at(body, cursor) {
            cleaned.push_str(&body[cursor..label.start()]);
            cursor = body[label.end()..]
                .find("\n(")
                .map(|pos| label.end() + pos)
                .unwrap_or(body.len());
        }
        cleaned.push_str(&body[cursor..]);
        cleaned
    }

    /// 题干：去掉指令后，取到第一个换行后的选项标记为止，并去掉行号引用 “l. 12”
    pub fn enunciation(&self, body: &str) -> String {
        let cleaned = self.strip_instructions(body);
        let first_option = self
            .option_start
            .find_iter(&cleaned)
            .find(|m| m.start() > 0);

        match first_option {
            Some(m) => {
                let head = cleaned[..m.start()].trim();
                self.line_citation.replace_all(head, "").into_owned()
            }
            None => cleaned.trim().to_string(),
        }
    }

    /// 选项 (A)~(E)，每项到下一个 (A)~(F) 标记或结尾；空白归一，空选项丢弃
    pub fn options(&self, body: &str) -> Vec<QuestionOption> {
        let markers: Vec<(usize, usize, char)> = self
            .option_marker
            .captures_iter(body)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let letter = caps.get(1)?.as_str().chars().next()?;
                Some((whole.start(), whole.end(), letter))
            })
            .collect();

        markers
            .iter()
            .enumerate()
            .filter(|(_, &(_, _, letter))| letter != 'F')
            .filter_map(|(i, &(_, text_start, letter))| {
                let text_end = markers.get(i + 1).map(|&(start, _, _)| start).unwrap_or(body.len());
                let text = normalize_whitespace(&body[text_start..text_end]);
                (!text.is_empty()).then_some(QuestionOption { letter, text })
            })
            .collect()
    }

    /// 题型，按优先级判断：判断题 > 计算题 > 阅读理解 > 选择题
    pub fn question_type(&self, body: &str) -> QuestionType {
        if self.true_false.is_match(body) {
            QuestionType::TrueFalse
        } else if self.calculation.is_match(body) {
            QuestionType::Calculation
        } else if body.chars().count() > TEXT_INTERPRETATION_CHARS {
            QuestionType::TextInterpretation
        } else {
            QuestionType::MultipleChoice
        }
    }

    /// 公式片段（去重）
    pub fn formulas(&self, body: &str) -> BTreeSet<String> {
        self.formulas
            .iter()
            .flat_map(|re| re.find_iter(body).map(|m| m.as_str().to_string()))
            .collect()
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 题目结构化器
///
/// 持有只读的图片索引和扫描结束时的“当前科目”（上下文里找不到科目时使用）
pub struct QuestionStructurer<'a> {
    classifier: &'a SubjectClassifier,
    index: &'a ImageIndex,
    associator: ImageAssociator,
    patterns: StructurePatterns,
    fallback_subject: Option<Subject>,
}

impl<'a> QuestionStructurer<'a> {
    pub fn new(
        classifier: &'a SubjectClassifier,
        index: &'a ImageIndex,
        fallback_subject: Option<Subject>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            classifier,
            index,
            associator: ImageAssociator::new()?,
            patterns: StructurePatterns::new()?,
            fallback_subject,
        })
    }

    pub fn structure(&self, raw: &RawQuestion) -> QuestionRecord {
        let body = raw.body.as_str();
        let subject = self.classifier.classify(&raw.context_before, self.fallback_subject);
        let page = self.patterns.page_from_context(&raw.context_before);

        let images: Vec<ImageRef> = self
            .associator
            .associate(self.index, raw.number, body, page, raw.next_number)
            .into_iter()
            .map(ImageRef::from)
            .collect();

        let record = QuestionRecord {
            number: raw.number,
            subject,
            instruction: self.patterns.instruction(body),
            enunciation: self.patterns.enunciation(body),
            options: self.patterns.options(body),
            question_type: self.patterns.question_type(body),
            has_image: !images.is_empty(),
            images,
            formulas: self.patterns.formulas(body),
        };

        info!(
            "  题目 {} 已提取 ({})",
            record.number,
            record.subject.map(|s| s.label()).unwrap_or("无科目")
        );
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageRecord;

    fn patterns() -> StructurePatterns {
        StructurePatterns::new().unwrap()
    }

    #[test]
    fn test_options_in_letter_order_with_normalized_text() {
        let options = patterns().options("(A) um (B) dois (C) tres");

        let pairs: Vec<(char, &str)> = options.iter().map(|o| (o.letter, o.text.as_str())).collect();
        assert_eq!(pairs, vec![('A', "um"), ('B', "dois"), ('C', "tres")]);
    }

    #[test]
    fn test_option_text_spans_lines_and_stops_at_f() {
        let options = patterns().options("Enunciado\n(A) primeira\n   linha\n(B) segunda (F) sobra");

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].text, "primeira linha");
        assert_eq!(options[1].text, "segunda");
    }

    #[test]
    fn test_empty_options_are_dropped() {
        let options = patterns().options("(A)   (B) dois");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].letter, 'B');
    }

    #[test]
    fn test_true_false_has_priority_over_calculation() {
        let p = patterns();
        assert_eq!(p.question_type("( ) afirmação (V) ∫ x dx"), QuestionType::TrueFalse);
        assert_eq!(p.question_type("Calcule x^2 + 1"), QuestionType::Calculation);
        assert_eq!(p.question_type(&"palavra ".repeat(120)), QuestionType::TextInterpretation);
        assert_eq!(p.question_type("Qual é a capital?"), QuestionType::MultipleChoice);
    }

    #[test]
    fn test_instruction_up_to_next_option_line() {
        let body = "Instrução: Leia o texto abaixo.\nTexto longo\n(A) um\n(B) dois";
        assert_eq!(
            patterns().instruction(body).as_deref(),
            Some("Leia o texto abaixo.\nTexto longo")
        );
        assert_eq!(
            patterns().instruction("INSTRUÇÃO: responda").as_deref(),
            Some("responda")
        );
        assert_eq!(patterns().instruction("Sem rótulo (A) x"), None);
    }

    #[test]
    fn test_enunciation_removes_instruction_and_line_citations() {
        let body = "Instrução: Leia.\n(texto auxiliar)\nNo trecho (l. 12), o autor afirma\n(A) um\n(B) dois";
        let enunciation = patterns().enunciation(body);

        assert!(!enunciation.contains("Instrução"));
        assert!(!enunciation.contains("l. 12"));
        assert!(enunciation.contains("o autor afirma"));
        assert!(!enunciation.contains("(A)"));
    }

    #[test]
    fn test_enunciation_without_options_is_whole_text() {
        assert_eq!(patterns().enunciation("  Discorra sobre o tema.  "), "Discorra sobre o tema.");
    }

    #[test]
    fn test_formulas_are_deduplicated() {
        let body = "Se x^2 = 4 e x^2 > 0, então \\sqrt{4} e \\frac{1}{2}; ∫ x dx";
        let formulas = patterns().formulas(body);

        let expected: BTreeSet<String> = ["x^2", "\\sqrt{4}", "\\frac{1}{2}", "∫ x dx"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(formulas, expected);
    }

    #[test]
    fn test_last_page_marker_wins() {
        let context = "\n[PAGINA:3]\nfim\n[PAGINA:4]\n[MATERIA:Química]\n";
        assert_eq!(patterns().page_from_context(context), Some(4));
        assert_eq!(patterns().page_from_context("sem marcador"), None);
    }

    #[test]
    fn test_structure_recovers_subject_page_and_images() {
        let classifier = SubjectClassifier::new().unwrap();
        let index = ImageIndex::from_records(vec![ImageRecord {
            file: "page2_img0.png".to_string(),
            path: "imagens_questoes/page2_img0.png".to_string(),
            page: 2,
            index: 0,
            bbox: None,
            format: "png".to_string(),
        }]);
        let structurer = QuestionStructurer::new(&classifier, &index, Some(Subject::Biology)).unwrap();

        let raw = RawQuestion {
            number: 12,
            body: "Observe a figura abaixo.\n(A) célula\n(B) tecido".to_string(),
            context_before: "\n[PAGINA:2]\n[MATERIA:Física]\n".to_string(),
            next_number: Some(13),
        };
        let record = structurer.structure(&raw);

        assert_eq!(record.number, 12);
        assert_eq!(record.subject, Some(Subject::Physics));
        assert_eq!(record.enunciation, "Observe a figura abaixo.");
        assert_eq!(record.options.len(), 2);
        assert!(record.has_image);
        assert_eq!(record.images[0].file, "page2_img0.png");
        assert_eq!(record.question_type, QuestionType::MultipleChoice);
    }

    #[test]
    fn test_structure_falls_back_to_last_subject() {
        let classifier = SubjectClassifier::new().unwrap();
        let index = ImageIndex::default();
        let structurer = QuestionStructurer::new(&classifier, &index, Some(Subject::Biology)).unwrap();

        let raw = RawQuestion {
            number: 1,
            body: "Questão sem cabeçalho por perto".to_string(),
            context_before: String::new(),
            next_number: None,
        };
        let record = structurer.structure(&raw);

        assert_eq!(record.subject, Some(Subject::Biology));
        assert!(!record.has_image);
        assert!(record.images.is_empty());
    }
}
