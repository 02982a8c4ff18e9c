use phf::phf_ordered_map;

/// 科目枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum Subject {
    /// 葡萄牙语
    #[serde(rename = "Português")]
    Portuguese,
    /// 文学
    #[serde(rename = "Literatura")]
    Literature,
    /// 数学
    #[serde(rename = "Matemática")]
    Mathematics,
    /// 物理
    #[serde(rename = "Física")]
    Physics,
    /// 化学
    #[serde(rename = "Química")]
    Chemistry,
    /// 历史
    #[serde(rename = "História")]
    History,
    /// 地理
    #[serde(rename = "Geografia")]
    Geography,
    /// 生物
    #[serde(rename = "Biologia")]
    Biology,
}

/// 科目标题关键词表
///
/// 有序表：表中顺序就是匹配优先级，同一段文本命中多个关键词时取靠前的一个
pub static SUBJECT_KEYWORDS: phf::OrderedMap<&'static str, Subject> = phf_ordered_map! {
    "PORTUGUÊS" => Subject::Portuguese,
    "LITERATURA" => Subject::Literature,
    "MATEMÁTICA" => Subject::Mathematics,
    "FÍSICA" => Subject::Physics,
    "QUÍMICA" => Subject::Chemistry,
    "HISTÓRIA" => Subject::History,
    "GEOGRAFIA" => Subject::Geography,
    "BIOLOGIA" => Subject::Biology,
};

impl Subject {
    /// 获取标准名称（与试卷上的写法一致）
    pub fn label(self) -> &'static str {
        match self {
            Subject::Portuguese => "Português",
            Subject::Literature => "Literatura",
            Subject::Mathematics => "Matemática",
            Subject::Physics => "Física",
            Subject::Chemistry => "Química",
            Subject::History => "História",
            Subject::Geography => "Geografia",
            Subject::Biology => "Biologia",
        }
    }

    /// 从标准名称解析科目（精确匹配）
    pub fn from_label(s: &str) -> Option<Self> {
        SUBJECT_KEYWORDS
            .values()
            .copied()
            .find(|subject| subject.label() == s)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_order() {
        let order: Vec<Subject> = SUBJECT_KEYWORDS.values().copied().collect();
        assert_eq!(order.first(), Some(&Subject::Portuguese));
        assert_eq!(order.last(), Some(&Subject::Biology));
        assert_eq!(order.len(), 8);
    }

    #[test]
    fn test_label_round_trip() {
        for subject in SUBJECT_KEYWORDS.values() {
            assert_eq!(Subject::from_label(subject.label()), Some(*subject));
        }
        assert_eq!(Subject::from_label("Inglês"), None);
    }
}
