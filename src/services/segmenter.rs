//! 题目切分 - 在带标记的全文中按“行首题号”切出每道题
//!
//! 题号边界：换行、可选空白、1~3 位数字、可选空白、句点、至少一个空白。
//! 每道题的正文从本边界之后一直延伸到下一个边界的起点（或全文结尾），
//! 下一个边界本身不会被当前题目吞掉。

use crate::models::RawQuestion;
use regex::Regex;
use tracing::info;

/// 题号之前保留的上下文长度（字符数）
pub const CONTEXT_CHARS: usize = 500;

/// 正文去空白后不超过这个字符数的题目直接丢弃
const MIN_BODY_CHARS: usize = 5;

/// 题目切分器
#[derive(Debug, Clone)]
pub struct QuestionSegmenter {
    boundary: Regex,
}

impl QuestionSegmenter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            boundary: Regex::new(r"\n\s*([0-9]{1,3})\s*\.\s+")?,
        })
    }

    /// 按文档顺序切分，不重新编号也不排序
    pub fn segment(&self, text: &str) -> Vec<RawQuestion> {
        let boundaries: Vec<(usize, usize, u32)> = self
            .boundary
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let number = caps.get(1)?.as_str().parse().ok()?;
                Some((whole.start(), whole.end(), number))
            })
            .collect();

        info!("✓ 找到 {} 道题目", boundaries.len());

        boundaries
            .iter()
            .enumerate()
            .filter_map(|(i, &(start, body_start, number))| {
                let next = boundaries.get(i + 1);
                let body_end = next.map(|&(next_start, _, _)| next_start).unwrap_or(text.len());
                let body = text[body_start..body_end].trim();
                if body.chars().count() <= MIN_BODY_CHARS {
                    return None;
                }

                Some(RawQuestion {
                    number,
                    body: body.to_string(),
                    context_before: context_before(text, start, CONTEXT_CHARS).to_string(),
                    next_number: next.map(|&(_, _, next_number)| next_number),
                })
            })
            .collect()
    }
}

/// `end` 之前最多 `max_chars` 个字符
fn context_before(text: &str, end: usize, max_chars: usize) -> &str {
    if max_chars == 0 {
        return "";
    }
    let head = &text[..end];
    let start = head
        .char_indices()
        .rev()
        .nth(max_chars - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &head[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> QuestionSegmenter {
        QuestionSegmenter::new().unwrap()
    }

    #[test]
    fn test_boundary_does_not_eat_next_question() {
        let text = "\n1. Alpha text (A) x (B) y\n2. Beta text (A) z";
        let questions = segmenter().segment(text);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].number, 1);
        assert_eq!(questions[1].number, 2);
        assert_eq!(questions[0].body, "Alpha text (A) x (B) y");
        assert!(!questions[0].body.contains("2. Beta"));
        assert_eq!(questions[1].body, "Beta text (A) z");
        assert_eq!(questions[0].next_number, Some(2));
        assert_eq!(questions[1].next_number, None);
    }

    #[test]
    fn test_number_inside_line_is_not_a_boundary() {
        let text = "\n7. Observe a Figure 12. see below and answer\n8. Next one here";
        let questions = segmenter().segment(text);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].number, 7);
        assert!(questions[0].body.contains("Figure 12. see below"));
    }

    #[test]
    fn test_short_bodies_are_dropped_but_still_counted_as_next() {
        let text = "\n1. Primeira questão completa\n2. curtinha\n3. Terceira questão completa";
        let questions = segmenter().segment(text);

        let numbers: Vec<u32> = questions.iter().map(|q| q.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        let text = "\n1. Primeira questão completa\n2. abc\n3. Terceira questão completa";
        let questions = segmenter().segment(text);
        let numbers: Vec<u32> = questions.iter().map(|q| q.number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(questions[0].next_number, Some(2));
    }

    #[test]
    fn test_body_spans_page_markers() {
        let text = "\n[PAGINA:0]\n[MATERIA:Física]\n5. Começa numa página\n[PAGINA:1]\ne termina na outra";
        let questions = segmenter().segment(text);

        assert_eq!(questions.len(), 1);
        assert!(questions[0].body.ends_with("e termina na outra"));
        assert!(questions[0].context_before.contains("[PAGINA:0]"));
        assert!(questions[0].context_before.contains("[MATERIA:Física]"));
    }

    #[test]
    fn test_context_is_limited_to_500_chars() {
        let filler = "ç".repeat(800);
        let text = format!("{}\n1. Uma questão qualquer", filler);
        let questions = segmenter().segment(&text);

        assert_eq!(questions[0].context_before.chars().count(), CONTEXT_CHARS);
    }

    #[test]
    fn test_context_before_short_prefix() {
        assert_eq!(context_before("abc", 3, 500), "abc");
        assert_eq!(context_before("abcdef", 6, 2), "ef");
        assert_eq!(context_before("abc", 3, 0), "");
    }
}
