use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "extractor.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 待处理的 PDF 文件
    pub pdf_path: String,
    /// 输出 JSON 文件
    pub output_json: String,
    /// 图片存放目录
    pub image_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_path: "UFRGS-2025.pdf".to_string(),
            output_json: "questoes_ufrgs_2025.json".to_string(),
            image_dir: "imagens_questoes".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 只从环境变量读取（未设置的项使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取配置：先读 TOML 文件（若存在），再用环境变量覆盖
    ///
    /// 配置文件路径取自 `EXTRACTOR_CONFIG`，缺省为 `extractor.toml`
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("EXTRACTOR_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        if Path::new(&path).is_file() {
            Ok(Self::from_toml_file(&path)?.with_env_overrides())
        } else {
            Ok(Self::from_env())
        }
    }

    /// 从 TOML 文件读取配置
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })
    }

    /// 从 TOML 字符串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            pdf_path: std::env::var("PDF_PATH").unwrap_or(self.pdf_path),
            output_json: std::env::var("OUTPUT_JSON").unwrap_or(self.output_json),
            image_dir: std::env::var("IMAGE_DIR").unwrap_or(self.image_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("output_json = \"saida.json\"\n").unwrap();
        assert_eq!(config.output_json, "saida.json");
        assert_eq!(config.pdf_path, "UFRGS-2025.pdf");
        assert_eq!(config.image_dir, "imagens_questoes");
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_bad_toml_is_rejected() {
        assert!(Config::from_toml_str("verbose_logging = \"talvez\"").is_err());
    }
}
