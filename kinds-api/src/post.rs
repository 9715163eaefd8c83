use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Post类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostType {
    /// 普通文章
    Standard,
    /// 上传的媒体文件
    Attachment,
}

/// 媒体类别，由附件的MIME类型推断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Audio,
    Video,
}

impl MediaCategory {
    /// 从MIME类型推断类别
    pub fn from_mime(mime: &str) -> Option<Self> {
        let primary = mime.split('/').next().unwrap_or(mime);
        match primary {
            "image" => Some(MediaCategory::Image),
            "audio" => Some(MediaCategory::Audio),
            "video" => Some(MediaCategory::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Image => "image",
            MediaCategory::Audio => "audio",
            MediaCategory::Video => "video",
        }
    }
}

/// Post实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,

    #[serde(rename = "postType")]
    pub post_type: PostType,

    pub title: String,

    pub content: String,

    pub excerpt: String,

    /// 作者的用户ID
    pub author: Option<i64>,

    /// 创建时间（站点时区）
    pub date: DateTime<FixedOffset>,

    /// 创建时间（UTC）
    #[serde(rename = "dateUtc")]
    pub date_utc: DateTime<Utc>,

    /// 修改时间（站点时区）
    pub modified: DateTime<FixedOffset>,

    /// 修改时间（UTC）
    #[serde(rename = "modifiedUtc")]
    pub modified_utc: DateTime<Utc>,

    /// MIME类型（仅附件）
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,

    /// 特色图片的附件ID
    pub featured: Option<i64>,

    /// 所属Post的ID（仅附件）
    pub parent: Option<i64>,

    /// 内容永久链接
    pub permalink: Option<String>,

    /// 文件直链（仅附件）
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
}

impl Post {
    pub fn new(id: i64, post_type: PostType) -> Self {
        let now = Utc::now();
        Self {
            id,
            post_type,
            title: String::new(),
            content: String::new(),
            excerpt: String::new(),
            author: None,
            date: now.with_timezone(&Utc.fix()),
            date_utc: now,
            modified: now.with_timezone(&Utc.fix()),
            modified_utc: now,
            mime_type: None,
            featured: None,
            parent: None,
            permalink: None,
            file_url: None,
        }
    }

    pub fn is_attachment(&self) -> bool {
        self.post_type == PostType::Attachment
    }

    /// 附件的媒体类别，普通Post返回None
    pub fn media_category(&self) -> Option<MediaCategory> {
        if !self.is_attachment() {
            return None;
        }
        self.mime_type.as_deref().and_then(MediaCategory::from_mime)
    }
}

/// Post更新请求，仅给定的字段会被写入
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,

    pub content: Option<String>,

    pub excerpt: Option<String>,

    pub date: Option<DateTime<FixedOffset>>,

    #[serde(rename = "dateUtc")]
    pub date_utc: Option<DateTime<Utc>>,

    pub modified: Option<DateTime<FixedOffset>>,

    #[serde(rename = "modifiedUtc")]
    pub modified_utc: Option<DateTime<Utc>>,

    pub featured: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_category_from_mime() {
        assert_eq!(MediaCategory::from_mime("image/jpeg"), Some(MediaCategory::Image));
        assert_eq!(MediaCategory::from_mime("audio/mpeg"), Some(MediaCategory::Audio));
        assert_eq!(MediaCategory::from_mime("video/mp4"), Some(MediaCategory::Video));
        assert_eq!(MediaCategory::from_mime("application/pdf"), None);
    }

    #[test]
    fn test_media_category_of_post() {
        let mut post = Post::new(1, PostType::Attachment);
        post.mime_type = Some("image/png".to_string());
        assert_eq!(post.media_category(), Some(MediaCategory::Image));

        // 普通Post即使带MIME类型也没有媒体类别
        let mut standard = Post::new(2, PostType::Standard);
        standard.mime_type = Some("image/png".to_string());
        assert_eq!(standard.media_category(), None);
    }

    #[test]
    fn test_post_update_default_is_noop() {
        let update = PostUpdate::default();
        assert!(update.title.is_none());
        assert!(update.featured.is_none());
    }
}
