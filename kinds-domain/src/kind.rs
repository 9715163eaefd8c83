use kinds_api::MediaCategory;
use serde::{Deserialize, Serialize};

/// Kind 文章的语义类型
///
/// 普通Post的Kind来自kind分类法词条；附件的Kind由媒体类别推断。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Article,
    Note,
    Reply,
    Repost,
    Like,
    Favorite,
    Bookmark,
    Quote,
    Rsvp,
    Listen,
    Watch,
    Read,
    Play,
    Checkin,
    Wish,
    Itinerary,
    Issue,
    Event,
    Photo,
    Video,
    Audio,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Article => "article",
            Kind::Note => "note",
            Kind::Reply => "reply",
            Kind::Repost => "repost",
            Kind::Like => "like",
            Kind::Favorite => "favorite",
            Kind::Bookmark => "bookmark",
            Kind::Quote => "quote",
            Kind::Rsvp => "rsvp",
            Kind::Listen => "listen",
            Kind::Watch => "watch",
            Kind::Read => "read",
            Kind::Play => "play",
            Kind::Checkin => "checkin",
            Kind::Wish => "wish",
            Kind::Itinerary => "itinerary",
            Kind::Issue => "issue",
            Kind::Event => "event",
            Kind::Photo => "photo",
            Kind::Video => "video",
            Kind::Audio => "audio",
        }
    }

    /// 从词条slug解析
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.to_lowercase().as_str() {
            "article" => Some(Kind::Article),
            "note" => Some(Kind::Note),
            "reply" => Some(Kind::Reply),
            "repost" => Some(Kind::Repost),
            "like" => Some(Kind::Like),
            "favorite" => Some(Kind::Favorite),
            "bookmark" => Some(Kind::Bookmark),
            "quote" => Some(Kind::Quote),
            "rsvp" => Some(Kind::Rsvp),
            "listen" => Some(Kind::Listen),
            "watch" => Some(Kind::Watch),
            "read" => Some(Kind::Read),
            "play" => Some(Kind::Play),
            "checkin" => Some(Kind::Checkin),
            "wish" => Some(Kind::Wish),
            "itinerary" => Some(Kind::Itinerary),
            "issue" => Some(Kind::Issue),
            "event" => Some(Kind::Event),
            "photo" => Some(Kind::Photo),
            "video" => Some(Kind::Video),
            "audio" => Some(Kind::Audio),
            _ => None,
        }
    }

    /// 附件媒体类别对应的Kind
    pub fn from_media_category(category: MediaCategory) -> Self {
        match category {
            MediaCategory::Image => Kind::Photo,
            MediaCategory::Audio => Kind::Audio,
            MediaCategory::Video => Kind::Video,
        }
    }

    /// Kind的引用（cite）所存放的规范属性名
    ///
    /// article和note等自足类型没有引用属性。
    pub fn cite_property(&self) -> Option<&'static str> {
        match self {
            Kind::Reply | Kind::Rsvp | Kind::Issue => Some("in-reply-to"),
            Kind::Repost => Some("repost-of"),
            Kind::Like => Some("like-of"),
            Kind::Favorite => Some("favorite-of"),
            Kind::Bookmark => Some("bookmark-of"),
            Kind::Quote => Some("quotation-of"),
            Kind::Listen => Some("listen-of"),
            Kind::Watch => Some("watch-of"),
            Kind::Read => Some("read-of"),
            Kind::Play => Some("play-of"),
            Kind::Checkin => Some("checkin"),
            Kind::Wish => Some("wish-of"),
            Kind::Itinerary => Some("itinerary"),
            Kind::Photo => Some("photo"),
            Kind::Video => Some("video"),
            Kind::Audio => Some("audio"),
            Kind::Article | Kind::Note | Kind::Event => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for kind in [Kind::Reply, Kind::Bookmark, Kind::Photo, Kind::Itinerary] {
            assert_eq!(Kind::from_slug(kind.as_str()), Some(kind));
        }
        assert_eq!(Kind::from_slug("REPLY"), Some(Kind::Reply));
        assert_eq!(Kind::from_slug("unknown"), None);
    }

    #[test]
    fn test_media_category_mapping() {
        assert_eq!(Kind::from_media_category(MediaCategory::Image), Kind::Photo);
        assert_eq!(Kind::from_media_category(MediaCategory::Audio), Kind::Audio);
        assert_eq!(Kind::from_media_category(MediaCategory::Video), Kind::Video);
    }

    #[test]
    fn test_cite_property() {
        assert_eq!(Kind::Reply.cite_property(), Some("in-reply-to"));
        assert_eq!(Kind::Bookmark.cite_property(), Some("bookmark-of"));
        assert_eq!(Kind::Article.cite_property(), None);
        assert_eq!(Kind::Note.cite_property(), None);
    }
}
