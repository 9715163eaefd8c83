use chrono::{FixedOffset, Offset, Utc};

/// 站点属性
///
/// 标题作为普通Post的publication属性来源，时区偏移用于
/// 本地时间的归一化。
#[derive(Debug, Clone)]
pub struct Site {
    /// 站点标题
    pub title: String,

    /// 外部访问URL
    pub external_url: Option<String>,

    /// 站点时区偏移
    pub timezone: FixedOffset,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            title: String::new(),
            external_url: None,
            timezone: Utc.fix(),
        }
    }
}

impl Site {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}
