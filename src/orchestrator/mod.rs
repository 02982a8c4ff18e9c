//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 管理一次运行的生命周期：打开 PDF、准备图片目录、执行提取流程、
//! 写出 JSON、输出统计。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (打开文档、写出结果)
//!     ↓
//! workflow::ExtractionFlow (两遍扫描 → 题目集合)
//!     ↓
//! services (能力层：科目 / 图片索引 / 切分 / 结构化 / 汇总)
//!     ↓
//! infrastructure (基础设施：PdfDocument / ByteStore / JSON)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有文档和文件系统存储
//! 2. **向下依赖**：编排层 → workflow → services → infrastructure
//! 3. **无业务逻辑**：只做调度和统计

pub mod app;

pub use app::App;
