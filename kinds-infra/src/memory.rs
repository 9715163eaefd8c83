use async_trait::async_trait;
use kinds_api::{MediaCategory, MetaValue, Post, PostStore, PostUpdate, Taxonomy, Term, User};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// MemoryPostStore 内存Post存储
///
/// 用于测试和单机嵌入场景，所有数据保存在进程内。
#[derive(Default)]
pub struct MemoryPostStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    posts: HashMap<i64, Post>,
    meta: HashMap<(i64, String), MetaValue>,
    terms: HashMap<(i64, Taxonomy), Vec<Term>>,
    users: HashMap<i64, User>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或替换Post
    pub async fn insert_post(&self, post: Post) {
        self.inner.write().await.posts.insert(post.id, post);
    }

    /// 插入或替换用户
    pub async fn insert_user(&self, user: User) {
        self.inner.write().await.users.insert(user.id, user);
    }

    /// 设置Post在某个分类法下的词条
    pub async fn set_terms(&self, id: i64, taxonomy: Taxonomy, terms: Vec<Term>) {
        self.inner.write().await.terms.insert((id, taxonomy), terms);
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn fetch(&self, id: i64) -> Result<Option<Post>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn update(&self, id: i64, update: PostUpdate) -> Result<Post, Box<dyn std::error::Error + Send + Sync>> {
        let mut tables = self.inner.write().await;
        let Some(post) = tables.posts.get_mut(&id) else {
            return Err(format!("Post not found: {}", id).into());
        };
        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(content) = update.content {
            post.content = content;
        }
        if let Some(excerpt) = update.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(date) = update.date {
            post.date = date;
        }
        if let Some(date_utc) = update.date_utc {
            post.date_utc = date_utc;
        }
        if let Some(modified) = update.modified {
            post.modified = modified;
        }
        if let Some(modified_utc) = update.modified_utc {
            post.modified_utc = modified_utc;
        }
        if let Some(featured) = update.featured {
            post.featured = Some(featured);
        }
        Ok(post.clone())
    }

    async fn resolve_permalink(&self, url: &str) -> Result<Option<i64>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .inner
            .read()
            .await
            .posts
            .values()
            .find(|post| post.permalink.as_deref() == Some(url))
            .map(|post| post.id))
    }

    async fn resolve_attachment_url(&self, url: &str) -> Result<Option<i64>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .inner
            .read()
            .await
            .posts
            .values()
            .find(|post| post.is_attachment() && post.file_url.as_deref() == Some(url))
            .map(|post| post.id))
    }

    async fn read_meta(&self, id: i64, key: &str) -> Result<Option<MetaValue>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.inner.read().await.meta.get(&(id, key.to_string())).cloned())
    }

    async fn write_meta(&self, id: i64, key: &str, value: MetaValue) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.inner
            .write()
            .await
            .meta
            .insert((id, key.to_string()), value);
        Ok(())
    }

    async fn delete_meta(&self, id: i64, key: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.inner.write().await.meta.remove(&(id, key.to_string()));
        Ok(())
    }

    async fn terms(&self, id: i64, taxonomy: Taxonomy) -> Result<Vec<Term>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .inner
            .read()
            .await
            .terms
            .get(&(id, taxonomy))
            .cloned()
            .unwrap_or_default())
    }

    async fn attached_media(&self, id: i64, category: MediaCategory) -> Result<Vec<i64>, Box<dyn std::error::Error + Send + Sync>> {
        let mut ids: Vec<i64> = self
            .inner
            .read()
            .await
            .posts
            .values()
            .filter(|post| post.parent == Some(id) && post.media_category() == Some(category))
            .map(|post| post.id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn fetch_user(&self, id: i64) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinds_api::PostType;

    fn attachment(id: i64, parent: i64, mime: &str, url: &str) -> Post {
        let mut post = Post::new(id, PostType::Attachment);
        post.parent = Some(parent);
        post.mime_type = Some(mime.to_string());
        post.file_url = Some(url.to_string());
        post
    }

    #[tokio::test]
    async fn test_update_applies_only_given_fields() {
        let store = MemoryPostStore::new();
        let mut post = Post::new(1, PostType::Standard);
        post.title = "Before".to_string();
        post.content = "Body".to_string();
        store.insert_post(post).await;

        let updated = store
            .update(
                1,
                PostUpdate {
                    title: Some("After".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.content, "Body");

        assert!(store.update(9, PostUpdate::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_meta_round_trip() {
        let store = MemoryPostStore::new();
        store.insert_post(Post::new(1, PostType::Standard)).await;

        assert_eq!(store.read_meta(1, "mf2_rsvp").await.unwrap(), None);
        store
            .write_meta(1, "mf2_rsvp", MetaValue::from("yes"))
            .await
            .unwrap();
        assert_eq!(
            store.read_meta(1, "mf2_rsvp").await.unwrap(),
            Some(MetaValue::from("yes"))
        );
        store.delete_meta(1, "mf2_rsvp").await.unwrap();
        assert_eq!(store.read_meta(1, "mf2_rsvp").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_attached_media_filters_by_parent_and_category() {
        let store = MemoryPostStore::new();
        store.insert_post(Post::new(1, PostType::Standard)).await;
        store
            .insert_post(attachment(11, 1, "image/jpeg", "https://example.com/a.jpg"))
            .await;
        store
            .insert_post(attachment(12, 1, "audio/mpeg", "https://example.com/b.mp3"))
            .await;
        store
            .insert_post(attachment(13, 2, "image/jpeg", "https://example.com/c.jpg"))
            .await;

        assert_eq!(
            store.attached_media(1, MediaCategory::Image).await.unwrap(),
            vec![11]
        );
        assert_eq!(
            store.attached_media(1, MediaCategory::Audio).await.unwrap(),
            vec![12]
        );
    }

    #[tokio::test]
    async fn test_url_resolution() {
        let store = MemoryPostStore::new();
        let mut post = Post::new(1, PostType::Standard);
        post.permalink = Some("https://example.com/posts/1".to_string());
        store.insert_post(post).await;
        store
            .insert_post(attachment(2, 1, "image/jpeg", "https://example.com/a.jpg"))
            .await;

        assert_eq!(
            store
                .resolve_permalink("https://example.com/posts/1")
                .await
                .unwrap(),
            Some(1)
        );
        // 附件直链不走永久链接解析
        assert_eq!(
            store
                .resolve_permalink("https://example.com/a.jpg")
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            store
                .resolve_attachment_url("https://example.com/a.jpg")
                .await
                .unwrap(),
            Some(2)
        );
    }
}
