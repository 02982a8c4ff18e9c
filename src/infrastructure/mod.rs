//! 基础设施层：外部协作者（PDF 读取、字节存储、JSON 输出）

pub mod byte_store;
pub mod document;
pub mod json_store;
pub mod pdf_document;

pub use byte_store::{ByteStore, FsByteStore, MemoryByteStore};
pub use document::{DocumentReader, EmbeddedImage, ImagePayload};
pub use json_store::{load_json, save_json};
pub use pdf_document::PdfDocument;
