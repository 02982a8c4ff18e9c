//! 汇总 - 过滤空题干并按题号排序

use crate::models::{QuestionCollection, QuestionRecord};
use tracing::debug;

/// 丢弃题干为空的题目，按题号稳定排序
///
/// 重复题号全部保留，不做合并
pub fn assemble(records: Vec<QuestionRecord>) -> QuestionCollection {
    let before = records.len();
    let mut kept: Vec<QuestionRecord> = records
        .into_iter()
        .filter(|record| !record.enunciation.trim().is_empty())
        .collect();
    kept.sort_by_key(|record| record.number);

    debug!("汇总: {} 道题目，丢弃 {} 道空题干", kept.len(), before - kept.len());
    QuestionCollection::from_sorted(kept)
}
