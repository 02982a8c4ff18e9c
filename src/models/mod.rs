pub mod image;
pub mod page;
pub mod question;
pub mod subject;

pub use image::{BoundingBox, ImageRecord, ImageRef};
pub use page::{ExtractionReport, ImageOutcome, PageOutcome, PageText, UnitFailure};
pub use question::{QuestionCollection, QuestionOption, QuestionRecord, QuestionType, RawQuestion};
pub use subject::{Subject, SUBJECT_KEYWORDS};
