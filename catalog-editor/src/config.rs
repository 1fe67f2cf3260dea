use crate::sync::SyncOptions;
use std::time::Duration;
use storefront_client::ClientConfig;

/// 编辑器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | STOREFRONT_API_URL | http://localhost:8080 | 后端地址 |
/// | STOREFRONT_TOKEN | (无) | 会话令牌 (Bearer) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | UPLOAD_CONCURRENCY | 1 | 单个图库同时上传的文件数 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录，设置后按天滚动写文件 |
///
/// # 示例
///
/// ```ignore
/// STOREFRONT_API_URL=https://shop.example.com STOREFRONT_TOKEN=... catalog-editor show <id>
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub request_timeout_ms: u64,
    pub upload_concurrency: usize,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载 (测试用)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("STOREFRONT_API_URL")
                .unwrap_or_else(|| "http://localhost:8080".into()),
            token: lookup("STOREFRONT_TOKEN").filter(|t| !t.trim().is_empty()),
            request_timeout_ms: lookup("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            upload_concurrency: lookup("UPLOAD_CONCURRENCY")
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(1),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|d| !d.is_empty()),
        }
    }

    /// 使用自定义值覆盖部分配置
    pub fn with_overrides(api_url: Option<String>, token: Option<String>) -> Self {
        let mut config = Self::from_env();
        if let Some(url) = api_url {
            config.api_url = url;
        }
        if token.is_some() {
            config.token = token;
        }
        config
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.api_url)
            .with_timeout(Duration::from_millis(self.request_timeout_ms));
        match &self.token {
            Some(token) => config.with_token(token),
            None => config,
        }
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions::default().with_upload_concurrency(self.upload_concurrency)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.api_url, "http://localhost:8080");
        assert!(config.token.is_none());
        assert_eq!(config.request_timeout_ms, 30000);
        assert_eq!(config.upload_concurrency, 1);
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_values_and_fallbacks() {
        let config = config_from(&[
            ("STOREFRONT_API_URL", "https://shop.example.com"),
            ("STOREFRONT_TOKEN", "  "),
            ("REQUEST_TIMEOUT_MS", "oops"),
            ("UPLOAD_CONCURRENCY", "0"),
            ("LOG_DIR", "/tmp/logs"),
        ]);
        assert_eq!(config.api_url, "https://shop.example.com");
        assert!(config.token.is_none());
        assert_eq!(config.request_timeout_ms, 30000);
        assert_eq!(config.upload_concurrency, 1);
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/logs"));
    }

    #[test]
    fn test_client_and_sync_settings() {
        let config = config_from(&[
            ("STOREFRONT_TOKEN", "secret"),
            ("REQUEST_TIMEOUT_MS", "2500"),
            ("UPLOAD_CONCURRENCY", "4"),
        ]);
        let client = config.client_config();
        assert_eq!(client.token.as_deref(), Some("secret"));
        assert_eq!(client.timeout, Duration::from_millis(2500));
        assert_eq!(config.sync_options().upload_concurrency, 4);
    }
}
