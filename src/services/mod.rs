//! 业务能力层：科目识别、图片索引、切分、结构化、汇总

pub mod assembler;
pub mod image_association;
pub mod image_index;
pub mod marked_text;
pub mod segmenter;
pub mod structurer;
pub mod subject_classifier;

pub use assembler::assemble;
pub use image_association::ImageAssociator;
pub use image_index::ImageIndex;
pub use marked_text::{read_pages, MarkedText};
pub use segmenter::QuestionSegmenter;
pub use structurer::{QuestionStructurer, StructurePatterns};
pub use subject_classifier::SubjectClassifier;
