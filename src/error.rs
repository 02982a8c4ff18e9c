use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文档读取相关错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// JSON 序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),
    /// 正则编译错误
    #[error("正则错误: {0}")]
    Pattern(#[from] regex::Error),
}

/// 文档读取相关错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 文档不存在
    #[error("PDF 不存在: {path}")]
    NotFound { path: String },
    /// 文档无法解析
    #[error("无法加载 PDF ({path}): {source}")]
    LoadFailed {
        path: String,
        #[source]
        source: lopdf::Error,
    },
    /// 页码超出范围
    #[error("页码 {page} 超出范围 (共 {page_count} 页)")]
    PageNotFound { page: u32, page_count: usize },
    /// 页面文本提取失败
    #[error("第 {page} 页文本提取失败: {source}")]
    PageText {
        page: u32,
        #[source]
        source: lopdf::Error,
    },
    /// 页面结构损坏（资源、内容流等）
    #[error("第 {page} 页结构错误: {reason}")]
    PageStructure { page: u32, reason: String },
    /// 图片对象解析失败
    #[error("图片对象 {object:?} 解析失败: {reason}")]
    ImageResolve { object: (u32, u16), reason: String },
    /// 不支持的图片编码
    #[error("不支持的图片编码 (对象 {object:?}): {reason}")]
    UnsupportedImage { object: (u32, u16), reason: String },
    /// 图片重新编码失败
    #[error("图片编码失败 (对象 {object:?}): {source}")]
    Encode {
        object: (u32, u16),
        #[source]
        source: image::ImageError,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("配置文件读取失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 配置文件解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl FileError {
    /// 创建写入失败错误
    pub fn write_failed(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        FileError::WriteFailed {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// 创建读取失败错误
    pub fn read_failed(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        FileError::ReadFailed {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// 创建目录失败错误
    pub fn create_dir_failed(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        FileError::CreateDirFailed {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
