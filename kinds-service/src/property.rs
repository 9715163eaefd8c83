use std::fmt;

/// mf2元数据键的命名空间前缀
pub const MF2_PREFIX: &str = "mf2_";

/// PropertyKey Post属性键
///
/// 具名键走专用访问器，其余键走mf2_命名空间下的通用元数据。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Published,
    Updated,
    Start,
    End,
    Author,
    Category,
    Featured,
    Name,
    Publication,
    Url,
    Duration,
    Summary,
    Content,
    Other(String),
}

impl PropertyKey {
    /// 从属性名解析，空键无效
    pub fn parse(key: &str) -> Option<Self> {
        if key.is_empty() {
            return None;
        }
        Some(match key {
            "published" => PropertyKey::Published,
            "updated" => PropertyKey::Updated,
            "start" => PropertyKey::Start,
            "end" => PropertyKey::End,
            "author" => PropertyKey::Author,
            "category" => PropertyKey::Category,
            "featured" => PropertyKey::Featured,
            "name" => PropertyKey::Name,
            "publication" => PropertyKey::Publication,
            "url" => PropertyKey::Url,
            "duration" => PropertyKey::Duration,
            "summary" => PropertyKey::Summary,
            "content" => PropertyKey::Content,
            other => PropertyKey::Other(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropertyKey::Published => "published",
            PropertyKey::Updated => "updated",
            PropertyKey::Start => "start",
            PropertyKey::End => "end",
            PropertyKey::Author => "author",
            PropertyKey::Category => "category",
            PropertyKey::Featured => "featured",
            PropertyKey::Name => "name",
            PropertyKey::Publication => "publication",
            PropertyKey::Url => "url",
            PropertyKey::Duration => "duration",
            PropertyKey::Summary => "summary",
            PropertyKey::Content => "content",
            PropertyKey::Other(key) => key,
        }
    }

    /// 对应的元数据存储键
    pub fn meta_key(&self) -> String {
        format!("{}{}", MF2_PREFIX, self.as_str())
    }

    pub fn is_datetime(&self) -> bool {
        matches!(
            self,
            PropertyKey::Published | PropertyKey::Updated | PropertyKey::Start | PropertyKey::End
        )
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(PropertyKey::parse("published"), Some(PropertyKey::Published));
        assert_eq!(PropertyKey::parse("summary"), Some(PropertyKey::Summary));
        assert_eq!(PropertyKey::parse(""), None);
    }

    #[test]
    fn test_other_keys_get_namespaced() {
        let key = PropertyKey::parse("in-reply-to").unwrap();
        assert_eq!(key, PropertyKey::Other("in-reply-to".to_string()));
        assert_eq!(key.meta_key(), "mf2_in-reply-to");
    }

    #[test]
    fn test_named_keys_also_namespaced() {
        assert_eq!(PropertyKey::Publication.meta_key(), "mf2_publication");
        assert_eq!(PropertyKey::Duration.meta_key(), "mf2_duration");
    }
}
