//! 字节存储 - 保存提取出的图片

use crate::error::FileError;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 字节存储能力
pub trait ByteStore {
    /// 以 `name` 保存一段字节，返回写入的位置
    fn store(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, FileError>;
}

/// 写入本地目录的字节存储
#[derive(Debug, Clone)]
pub struct FsByteStore {
    root: PathBuf,
}

impl FsByteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ByteStore for FsByteStore {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, FileError> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| FileError::create_dir_failed(parent, e))?;
        }

        // 文件句柄只活在这个作用域里，离开前先 flush
        {
            let mut file = File::create(&path).map_err(|e| FileError::write_failed(&path, e))?;
            file.write_all(bytes).map_err(|e| FileError::write_failed(&path, e))?;
            file.flush().map_err(|e| FileError::write_failed(&path, e))?;
        }

        debug!("已写入 {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }
}

/// 内存字节存储，用于测试和试运行
#[derive(Debug, Default)]
pub struct MemoryByteStore {
    root: PathBuf,
    entries: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryByteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: RefCell::new(BTreeMap::new()),
        }
    }

    /// 已保存的名字（按字典序）
    pub fn names(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.entries.borrow().get(name).cloned()
    }
}

impl ByteStore for MemoryByteStore {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, FileError> {
        self.entries
            .borrow_mut()
            .insert(name.to_string(), bytes.to_vec());
        Ok(self.root.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_store_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsByteStore::new(dir.path().join("imagens").join("questoes"));

        let path = store.store("page0_img0.png", b"\x89PNG").unwrap();

        assert_eq!(path, store.root().join("page0_img0.png"));
        assert_eq!(fs::read(&path).unwrap(), b"\x89PNG");
    }

    #[test]
    fn test_memory_store_keeps_bytes() {
        let store = MemoryByteStore::new("imagens_questoes");
        let path = store.store("page1_img0.jpeg", &[1, 2, 3]).unwrap();

        assert_eq!(path, PathBuf::from("imagens_questoes/page1_img0.jpeg"));
        assert_eq!(store.get("page1_img0.jpeg"), Some(vec![1, 2, 3]));
        assert_eq!(store.names(), vec!["page1_img0.jpeg".to_string()]);
    }
}
