//! 流程层：定义“一份 PDF”从两遍扫描到题目集合的完整流程

pub mod extraction_flow;

pub use extraction_flow::{ExtractionFlow, ExtractionOutcome};
