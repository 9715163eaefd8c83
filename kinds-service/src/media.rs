use kinds_api::MediaCategory;
use regex::Regex;

/// 内嵌媒体ID缓存的元数据键
pub fn cache_key(category: MediaCategory) -> &'static str {
    match category {
        MediaCategory::Image => "_content_image_ids",
        MediaCategory::Audio => "_content_audio_ids",
        MediaCategory::Video => "_content_video_ids",
    }
}

/// 提取HTML内容中媒体标签的src链接
pub fn extract_media_urls(content: &str) -> Vec<String> {
    let pattern =
        match Regex::new(r#"(?i)<(?:img|audio|video|source)\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#) {
            Ok(pattern) => pattern,
            Err(_) => return Vec::new(),
        };
    pattern
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// 去除HTML标签，保留纯文本
///
/// script和style块连同内容一起移除，结果去除首尾空白。
pub fn strip_tags(html: &str) -> String {
    let mut text = html.to_string();
    for tag in ["script", "style"] {
        let block = format!(r"(?is)<{tag}[^>]*>.*?</{tag}>");
        if let Ok(pattern) = Regex::new(&block) {
            text = pattern.replace_all(&text, "").into_owned();
        }
    }
    if let Ok(pattern) = Regex::new(r"<[^>]*>") {
        text = pattern.replace_all(&text, "").into_owned();
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_media_urls() {
        let content = r#"<p>hi</p>
            <img src="https://example.com/a.jpg" alt="a">
            <audio controls src='https://example.com/b.mp3'></audio>
            <video><source src="https://example.com/c.mp4" type="video/mp4"></video>"#;
        let urls = extract_media_urls(content);
        assert_eq!(
            urls,
            vec![
                "https://example.com/a.jpg",
                "https://example.com/b.mp3",
                "https://example.com/c.mp4",
            ]
        );
    }

    #[test]
    fn test_extract_ignores_links() {
        let content = r#"<a href="https://example.com/a.jpg">link</a>"#;
        assert!(extract_media_urls(content).is_empty());
    }

    #[test]
    fn test_strip_tags() {
        let html = "<p>Hello <strong>world</strong></p>";
        assert_eq!(strip_tags(html), "Hello world");
    }

    #[test]
    fn test_strip_tags_drops_script_content() {
        let html = "<p>before</p><script>var x = 1;</script><style>p { color: red }</style>after";
        assert_eq!(strip_tags(html), "beforeafter");
    }
}
