use serde::{Deserialize, Serialize};

/// User实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    #[serde(rename = "displayName")]
    pub display_name: String,

    /// 个人主页URL
    pub url: Option<String>,

    /// 头像URL
    pub avatar: Option<String>,

    /// 作者归档页URL，个人主页缺失时的后备
    #[serde(rename = "archiveUrl")]
    pub archive_url: Option<String>,
}

impl User {
    pub fn new(id: i64, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            url: None,
            avatar: None,
            archive_url: None,
        }
    }
}
