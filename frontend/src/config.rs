//! 编译期配置
//!
//! 通过构建时环境变量覆盖默认值，例如：
//! `LOMALINDA_API_BASE_URL=https://erp.example.com trunk build --release`

use log::Level;
use std::str::FromStr;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 后端基础地址，不含 `/api/v1`
    pub api_base_url: String,
    pub log_level: Level,
    /// 供应商分页大小，用于计算总页数
    pub page_size: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: Level::Info,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::resolve(
            option_env!("LOMALINDA_API_BASE_URL"),
            option_env!("LOMALINDA_LOG_LEVEL"),
            option_env!("LOMALINDA_PAGE_SIZE"),
        )
    }

    /// 空值或无法解析的值回退到默认值
    fn resolve(base_url: Option<&str>, log_level: Option<&str>, page_size: Option<&str>) -> Self {
        let defaults = Self::default();

        let api_base_url = base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let log_level = log_level
            .and_then(|s| Level::from_str(s.trim()).ok())
            .unwrap_or(defaults.log_level);

        let page_size = page_size
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.page_size);

        Self {
            api_base_url,
            log_level,
            page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_values_use_defaults() {
        assert_eq!(AppConfig::resolve(None, None, None), AppConfig::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = AppConfig::resolve(Some("https://erp.lomalinda.gt/"), Some("debug"), Some("25"));
        assert_eq!(cfg.api_base_url, "https://erp.lomalinda.gt");
        assert_eq!(cfg.log_level, Level::Debug);
        assert_eq!(cfg.page_size, 25);
    }

    #[test]
    fn garbage_falls_back() {
        let cfg = AppConfig::resolve(Some("  "), Some("loud"), Some("0"));
        assert_eq!(cfg, AppConfig::default());
    }
}
