use chrono::{FixedOffset, Offset, Utc};
use kinds_domain::Site;
use serde::{Deserialize, Serialize};

/// 站点配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// 站点标题
    pub title: String,

    /// 外部访问URL
    pub url: Option<String>,

    /// 时区偏移，如+08:00
    pub timezone: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Kinds".to_string(),
            url: None,
            timezone: "+00:00".to_string(),
        }
    }
}

impl SiteConfig {
    /// 转换为领域站点属性，偏移无法解析时回退到UTC
    pub fn to_site(&self) -> Site {
        Site {
            title: self.title.clone(),
            external_url: self.url.clone(),
            timezone: parse_offset(&self.timezone).unwrap_or_else(|| Utc.fix()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub mysql: Option<DatabaseConnectionConfig>,
    pub postgresql: Option<DatabaseConnectionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConnectionConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Kinds配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KindsConfig {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl KindsConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("kinds.toml").required(false))
            .add_source(config::Environment::with_prefix("KINDS").separator("__"));

        // 如果存在.env文件，加载它
        if dotenv::dotenv().is_ok() {
            builder = builder.add_source(config::Environment::with_prefix("KINDS").separator("__"));
        }

        let config = builder.build()?;
        config.try_deserialize()
    }
}

/// 解析±HH:MM形式的时区偏移
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let text = text.trim();
    if text.is_empty() || text == "Z" || text.eq_ignore_ascii_case("utc") {
        return Some(Utc.fix());
    }
    let (sign, rest) = if let Some(rest) = text.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = text.strip_prefix('-') {
        (-1, rest)
    } else {
        return None;
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("+00:00"), FixedOffset::east_opt(0));
        assert_eq!(parse_offset("+08:00"), FixedOffset::east_opt(8 * 3600));
        assert_eq!(parse_offset("-05:30"), FixedOffset::east_opt(-(5 * 3600 + 30 * 60)));
        assert_eq!(parse_offset("Z"), FixedOffset::east_opt(0));
        assert_eq!(parse_offset("utc"), FixedOffset::east_opt(0));
        assert_eq!(parse_offset("later"), None);
    }

    #[test]
    fn test_to_site_falls_back_to_utc() {
        let config = SiteConfig {
            title: "My Site".to_string(),
            url: Some("https://example.com".to_string()),
            timezone: "invalid".to_string(),
        };
        let site = config.to_site();
        assert_eq!(site.title, "My Site");
        assert_eq!(site.timezone, Utc.fix());
    }
}
