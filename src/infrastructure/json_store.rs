use crate::error::{AppResult, FileError};
use crate::models::QuestionCollection;
use std::fs;
use std::path::Path;
use tracing::info;

/// 保存题目集合为 JSON（UTF-8、缩进两格，非 ASCII 字符原样输出）
pub fn save_json(collection: &QuestionCollection, path: impl AsRef<Path>) -> AppResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FileError::create_dir_failed(parent, e))?;
    }

    let content = serde_json::to_string_pretty(collection)?;
    fs::write(path, content).map_err(|e| FileError::write_failed(path, e))?;

    info!("✓ {} 道题目已保存到 {}", collection.len(), path.display());
    Ok(())
}

/// 读取 `save_json` 写出的文件
pub fn load_json(path: impl AsRef<Path>) -> AppResult<QuestionCollection> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| FileError::read_failed(path, e))?;
    Ok(serde_json::from_str(&content)?)
}
