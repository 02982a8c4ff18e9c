use crate::models::image::ImageRef;
use crate::models::subject::Subject;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 切分器产出的原始题目，交给结构化步骤后即丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuestion {
    /// 题号
    pub number: u32,
    /// 题目正文（已去首尾空白）
    pub body: String,
    /// 题号之前最多 500 个字符，用来恢复科目和页码
    pub context_before: String,
    /// 下一道题的题号（若有）
    pub next_number: Option<u32>,
}

/// 选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// A-E
    #[serde(rename = "letra")]
    pub letter: char,
    #[serde(rename = "texto")]
    pub text: String,
}

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "verdadeiro_falso")]
    TrueFalse,
    #[serde(rename = "calculo")]
    Calculation,
    #[serde(rename = "interpretacao_texto")]
    TextInterpretation,
    #[serde(rename = "multipla_escolha")]
    MultipleChoice,
}

/// 结构化后的题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "numero")]
    pub number: u32,
    #[serde(rename = "materia")]
    pub subject: Option<Subject>,
    #[serde(rename = "instrucao")]
    pub instruction: Option<String>,
    #[serde(rename = "enunciado")]
    pub enunciation: String,
    #[serde(rename = "alternativas")]
    pub options: Vec<QuestionOption>,
    #[serde(rename = "tipo")]
    pub question_type: QuestionType,
    #[serde(rename = "tem_imagem")]
    pub has_image: bool,
    #[serde(rename = "imagens")]
    pub images: Vec<ImageRef>,
    pub formulas: BTreeSet<String>,
}

/// 按题号排好序的题目集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionCollection {
    questions: Vec<QuestionRecord>,
}

impl QuestionCollection {
    /// 由已经过滤、排序的题目构建（见 `services::assembler`）
    pub(crate) fn from_sorted(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionRecord> {
        self.questions.iter()
    }

    pub fn first(&self) -> Option<&QuestionRecord> {
        self.questions.first()
    }

    /// 每个科目的题目数量（无科目的题目记在 `None` 下）
    pub fn subject_counts(&self) -> BTreeMap<Option<Subject>, usize> {
        let mut counts = BTreeMap::new();
        for question in &self.questions {
            *counts.entry(question.subject).or_insert(0) += 1;
        }
        counts
    }

    /// 带图片的题目数量
    pub fn with_images_count(&self) -> usize {
        self.questions.iter().filter(|q| q.has_image).count()
    }

    /// 最小和最大题号
    pub fn number_range(&self) -> Option<(u32, u32)> {
        let min = self.questions.iter().map(|q| q.number).min()?;
        let max = self.questions.iter().map(|q| q.number).max()?;
        Some((min, max))
    }

    /// 不重复的题号数量
    pub fn unique_numbers(&self) -> usize {
        self.questions
            .iter()
            .map(|q| q.number)
            .collect::<BTreeSet<_>>()
            .len()
    }
}
