use crate::media;
use crate::property::PropertyKey;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use indexmap::IndexMap;
use kinds_api::{
    collapse_to_single, KindsError, MediaCategory, MetaValue, Post, PostStore, PostUpdate, Result,
    Taxonomy, User,
};
use kinds_domain::{Kind, Mf2Duration, Site};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Post的定位方式：ID、URL或Post对象
#[derive(Debug, Clone)]
pub enum PostTarget {
    Id(i64),
    Url(String),
    Post(Post),
}

/// HTML内容及其纯文本形式
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlContent {
    pub html: String,
    /// 去除标签后的纯文本
    pub value: String,
}

/// 属性值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Datetime(DateTime<FixedOffset>),
    Duration(Mf2Duration),
    Html(HtmlContent),
    Value(MetaValue),
}

/// 音频来源：附件ID，或无法解析为附件时的外部URL
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AudioSources {
    Attachments(Vec<i64>),
    External(Vec<MetaValue>),
}

/// KindPostService trait 定义Post属性的读写操作
///
/// 每次访问都重新读取存储，实例不持有任何状态；所有写入
/// 都直接落到存储。
#[async_trait]
pub trait KindPostService: Send + Sync {
    /// 将定位方式解析为存在的Post ID
    async fn resolve(&self, target: PostTarget) -> Result<i64>;

    /// 获取底层Post
    async fn get_post(&self, id: i64) -> Result<Post>;

    /// 获取Post Kind，附件由媒体类别推断
    async fn get_kind(&self, id: i64) -> Result<Option<Kind>>;

    /// 读取属性值
    async fn get(&self, id: i64, key: &PropertyKey, single: bool) -> Result<Option<PropertyValue>>;

    /// 写入属性值
    async fn set(&self, id: i64, key: &PropertyKey, value: MetaValue) -> Result<()>;

    /// 删除属性的元数据，原生字段不受影响
    async fn delete(&self, id: i64, key: &PropertyKey) -> Result<()>;

    /// 获取标题，标题与ID相同时视为缺失
    async fn get_name(&self, id: i64) -> Result<Option<String>>;

    /// 获取URL，附件返回文件直链
    async fn get_url(&self, id: i64) -> Result<Option<String>>;

    /// 获取特色图片的URL
    async fn get_featured(&self, id: i64) -> Result<Option<String>>;

    /// 获取出版物名称，普通Post为站点标题
    async fn get_publication(&self, id: i64) -> Result<Option<String>>;

    /// 获取分类和标签名称的并集，去重且不含Uncategorized
    async fn get_categories(&self, id: i64) -> Result<Vec<String>>;

    /// 获取作者，普通Post构造h-card，附件读取元数据
    async fn get_author(&self, id: i64) -> Result<Option<MetaValue>>;

    /// 写入作者元数据，仅附件有效，普通Post为无操作
    async fn set_author(&self, id: i64, value: MetaValue) -> Result<()>;

    /// 读取日期属性
    async fn get_datetime(&self, id: i64, key: &PropertyKey)
        -> Result<Option<DateTime<FixedOffset>>>;

    /// 写入日期属性，普通Post的published/updated写原生字段
    async fn set_datetime(
        &self,
        id: i64,
        key: &PropertyKey,
        value: DateTime<FixedOffset>,
    ) -> Result<()>;

    /// 读取时长
    async fn get_duration(&self, id: i64) -> Result<Option<Mf2Duration>>;

    /// 写入规范化的时长
    async fn set_duration(&self, id: i64, value: Mf2Duration) -> Result<()>;

    /// 获取summary或content的HTML及纯文本
    async fn get_html(&self, id: i64, key: &PropertyKey) -> Result<Option<HtmlContent>>;

    /// 获取关联的图片附件ID
    async fn get_photo(&self, id: i64, content_aware: bool) -> Result<Option<Vec<i64>>>;

    /// 获取关联的音频，无法解析时退回外部URL
    async fn get_audio(&self, id: i64, content_aware: bool) -> Result<Option<AudioSources>>;

    /// 获取关联的视频附件ID
    async fn get_video(&self, id: i64, content_aware: bool) -> Result<Option<Vec<i64>>>;

    /// 获取指定类别的关联附件ID
    async fn get_attached_media(&self, id: i64, category: MediaCategory) -> Result<Vec<i64>>;

    /// 获取Post引用的条目（cite）
    async fn get_cite(&self, id: i64) -> Result<Option<MetaValue>>;
}

/// 默认KindPostService实现
pub struct DefaultKindPostService<S: PostStore> {
    store: Arc<S>,
    site: Site,
}

impl<S: PostStore> DefaultKindPostService<S> {
    pub fn new(store: Arc<S>, site: Site) -> Self {
        Self { store, site }
    }

    async fn require_post(&self, id: i64) -> Result<Post> {
        let post = self.store.fetch(id).await?;
        post.ok_or_else(|| KindsError::NotFound(id.to_string()))
    }

    fn name_of(post: &Post) -> Option<String> {
        if post.title.is_empty() || post.title == post.id.to_string() {
            return None;
        }
        Some(post.title.clone())
    }

    fn parse_datetime_text(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Some(parsed);
        }
        let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").ok()?;
        self.site.timezone.from_local_datetime(&naive).single()
    }

    fn author_card(user: &User) -> MetaValue {
        let mut properties = IndexMap::new();
        properties.insert(
            "name".to_string(),
            MetaValue::List(vec![MetaValue::Str(user.display_name.clone())]),
        );
        if let Some(url) = user.url.clone().or_else(|| user.archive_url.clone()) {
            properties.insert("url".to_string(), MetaValue::List(vec![MetaValue::Str(url)]));
        }
        if let Some(avatar) = user.avatar.clone() {
            properties.insert(
                "photo".to_string(),
                MetaValue::List(vec![MetaValue::Str(avatar)]),
            );
        }
        let mut card = IndexMap::new();
        card.insert(
            "type".to_string(),
            MetaValue::List(vec![MetaValue::Str("h-card".to_string())]),
        );
        card.insert("properties".to_string(), MetaValue::Map(properties));
        MetaValue::Map(card)
    }

    fn cached_ids(value: &MetaValue) -> Vec<i64> {
        match value {
            MetaValue::List(items) => items.iter().filter_map(MetaValue::as_id).collect(),
            other => other.as_id().into_iter().collect(),
        }
    }

    fn push_unique(ids: &mut Vec<i64>, id: i64) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// 内嵌媒体的附件ID，带存储侧缓存，缺失时重新扫描
    async fn content_media_ids(&self, post: &Post, category: MediaCategory) -> Result<Vec<i64>> {
        let cache_key = media::cache_key(category);
        if let Some(cached) = self.store.read_meta(post.id, cache_key).await? {
            return Ok(Self::cached_ids(&cached));
        }
        if post.content.is_empty() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for url in media::extract_media_urls(&post.content) {
            let Some(att_id) = self.store.resolve_attachment_url(&url).await? else {
                continue;
            };
            let Some(attachment) = self.store.fetch(att_id).await? else {
                continue;
            };
            if attachment.media_category() == Some(category) {
                Self::push_unique(&mut ids, att_id);
            }
        }
        debug!(
            post_id = post.id,
            category = category.as_str(),
            count = ids.len(),
            "scanned post content for embedded media"
        );
        self.store
            .write_meta(
                post.id,
                cache_key,
                MetaValue::List(ids.iter().map(|&id| MetaValue::Num(id)).collect()),
            )
            .await?;
        Ok(ids)
    }

    /// 把元数据值解析为附件ID：ID、URL、或带url键的对象
    async fn attachments_from_urls(&self, value: &MetaValue) -> Result<Vec<i64>> {
        match value {
            MetaValue::Str(url) => {
                Ok(self.store.resolve_attachment_url(url).await?.into_iter().collect())
            }
            MetaValue::List(items) => {
                let mut ids = Vec::new();
                for item in items {
                    let resolved = match item {
                        MetaValue::Map(map) => match map.get("url").and_then(|v| v.as_str()) {
                            Some(url) => self.store.resolve_attachment_url(url).await?,
                            None => None,
                        },
                        MetaValue::Num(id) => Some(*id),
                        MetaValue::Str(text) => match text.trim().parse::<i64>() {
                            Ok(id) => Some(id),
                            Err(_) => self.store.resolve_attachment_url(text).await?,
                        },
                        MetaValue::List(_) => None,
                    };
                    if let Some(id) = resolved {
                        Self::push_unique(&mut ids, id);
                    }
                }
                Ok(ids)
            }
            _ => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl<S: PostStore> KindPostService for DefaultKindPostService<S> {
    async fn resolve(&self, target: PostTarget) -> Result<i64> {
        let id = match target {
            PostTarget::Id(id) => id,
            PostTarget::Post(post) => post.id,
            PostTarget::Url(url) => {
                if let Ok(id) = url.trim().parse::<i64>() {
                    id
                } else {
                    let resolved = match self.store.resolve_permalink(&url).await? {
                        Some(id) => Some(id),
                        None => self.store.resolve_attachment_url(&url).await?,
                    };
                    match resolved {
                        Some(id) => id,
                        None => return Err(KindsError::NotFound(url)),
                    }
                }
            }
        };
        self.require_post(id).await?;
        debug!(id, "resolved post target");
        Ok(id)
    }

    async fn get_post(&self, id: i64) -> Result<Post> {
        self.require_post(id).await
    }

    async fn get_kind(&self, id: i64) -> Result<Option<Kind>> {
        let post = self.require_post(id).await?;
        if post.is_attachment() {
            return Ok(post.media_category().map(Kind::from_media_category));
        }
        let terms = self.store.terms(id, Taxonomy::Kind).await?;
        Ok(terms.first().and_then(|term| Kind::from_slug(&term.slug)))
    }

    async fn get(&self, id: i64, key: &PropertyKey, single: bool) -> Result<Option<PropertyValue>> {
        match key {
            PropertyKey::Published | PropertyKey::Updated | PropertyKey::Start | PropertyKey::End => {
                Ok(self.get_datetime(id, key).await?.map(PropertyValue::Datetime))
            }
            PropertyKey::Author => Ok(self.get_author(id).await?.map(PropertyValue::Value)),
            PropertyKey::Category => {
                let names = self.get_categories(id).await?;
                Ok(Some(PropertyValue::Value(MetaValue::List(
                    names.into_iter().map(MetaValue::Str).collect(),
                ))))
            }
            PropertyKey::Featured => Ok(self
                .get_featured(id)
                .await?
                .map(|url| PropertyValue::Value(MetaValue::Str(url)))),
            PropertyKey::Name => Ok(self
                .get_name(id)
                .await?
                .map(|name| PropertyValue::Value(MetaValue::Str(name)))),
            PropertyKey::Publication => Ok(self
                .get_publication(id)
                .await?
                .map(|title| PropertyValue::Value(MetaValue::Str(title)))),
            PropertyKey::Url => Ok(self
                .get_url(id)
                .await?
                .map(|url| PropertyValue::Value(MetaValue::Str(url)))),
            PropertyKey::Duration => Ok(self.get_duration(id).await?.map(PropertyValue::Duration)),
            PropertyKey::Summary | PropertyKey::Content => {
                Ok(self.get_html(id, key).await?.map(PropertyValue::Html))
            }
            PropertyKey::Other(_) => {
                let Some(value) = self.store.read_meta(id, &key.meta_key()).await? else {
                    return Ok(None);
                };
                let value = match value {
                    list @ MetaValue::List(_) if single => collapse_to_single(list, false),
                    scalar @ (MetaValue::Str(_) | MetaValue::Num(_)) if !single => {
                        MetaValue::List(vec![scalar])
                    }
                    other => other,
                };
                Ok(Some(PropertyValue::Value(value)))
            }
        }
    }

    async fn set(&self, id: i64, key: &PropertyKey, value: MetaValue) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }
        match key {
            PropertyKey::Published | PropertyKey::Updated | PropertyKey::Start | PropertyKey::End => {
                let first = value.into_first();
                let text = first.as_ref().and_then(|v| v.as_str()).unwrap_or_default();
                let parsed = self
                    .parse_datetime_text(text)
                    .ok_or_else(|| KindsError::InvalidDate(text.to_string()))?;
                self.set_datetime(id, key, parsed).await
            }
            PropertyKey::Author => self.set_author(id, value).await,
            PropertyKey::Featured => {
                let resolved = match &value {
                    MetaValue::Num(id) => Some(*id),
                    MetaValue::Str(text) => match text.trim().parse::<i64>() {
                        Ok(id) => Some(id),
                        Err(_) => self.store.resolve_attachment_url(text).await?,
                    },
                    _ => None,
                };
                let Some(attachment) = resolved else {
                    return Err(KindsError::InvalidValue(
                        "featured expects an attachment id or resolvable URL".to_string(),
                    ));
                };
                self.store
                    .update(
                        id,
                        PostUpdate {
                            featured: Some(attachment),
                            ..Default::default()
                        },
                    )
                    .await?;
                Ok(())
            }
            PropertyKey::Name => {
                let title = match value {
                    MetaValue::Str(text) => text,
                    MetaValue::Num(n) => n.to_string(),
                    _ => {
                        return Err(KindsError::InvalidValue("name expects a string".to_string()))
                    }
                };
                self.store
                    .update(
                        id,
                        PostUpdate {
                            title: Some(title),
                            ..Default::default()
                        },
                    )
                    .await?;
                Ok(())
            }
            PropertyKey::Duration => {
                let first = value.into_first();
                let text = first.as_ref().and_then(|v| v.as_str()).unwrap_or_default();
                let duration = Mf2Duration::parse(text)
                    .ok_or_else(|| KindsError::InvalidDuration(text.to_string()))?;
                self.set_duration(id, duration).await
            }
            PropertyKey::Summary | PropertyKey::Content => {
                let text = match value {
                    MetaValue::Str(text) => text,
                    MetaValue::Num(n) => n.to_string(),
                    MetaValue::Map(map) => match map.get("html").and_then(|v| v.as_str()) {
                        Some(html) => html.to_string(),
                        None => {
                            return Err(KindsError::InvalidValue(format!(
                                "{} expects a string or an html map",
                                key
                            )))
                        }
                    },
                    MetaValue::List(items) => match items.into_iter().next() {
                        Some(MetaValue::Str(text)) => text,
                        _ => {
                            return Err(KindsError::InvalidValue(format!(
                                "{} expects a string or an html map",
                                key
                            )))
                        }
                    },
                };
                let update = if *key == PropertyKey::Summary {
                    PostUpdate {
                        excerpt: Some(text),
                        ..Default::default()
                    }
                } else {
                    PostUpdate {
                        content: Some(text),
                        ..Default::default()
                    }
                };
                self.store.update(id, update).await?;
                Ok(())
            }
            _ => {
                self.store.write_meta(id, &key.meta_key(), value).await?;
                Ok(())
            }
        }
    }

    async fn delete(&self, id: i64, key: &PropertyKey) -> Result<()> {
        self.store.delete_meta(id, &key.meta_key()).await?;
        Ok(())
    }

    async fn get_name(&self, id: i64) -> Result<Option<String>> {
        let post = self.require_post(id).await?;
        Ok(Self::name_of(&post))
    }

    async fn get_url(&self, id: i64) -> Result<Option<String>> {
        let post = self.require_post(id).await?;
        if post.is_attachment() {
            Ok(post.file_url)
        } else {
            Ok(post.permalink)
        }
    }

    async fn get_featured(&self, id: i64) -> Result<Option<String>> {
        let post = self.require_post(id).await?;
        let Some(featured) = post.featured else {
            return Ok(None);
        };
        let attachment = self.store.fetch(featured).await?;
        Ok(attachment.and_then(|post| post.file_url))
    }

    async fn get_publication(&self, id: i64) -> Result<Option<String>> {
        let post = self.require_post(id).await?;
        if !post.is_attachment() {
            return Ok(Some(self.site.title.clone()));
        }
        let value = self
            .store
            .read_meta(id, &PropertyKey::Publication.meta_key())
            .await?;
        Ok(value
            .and_then(MetaValue::into_first)
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    async fn get_categories(&self, id: i64) -> Result<Vec<String>> {
        self.require_post(id).await?;
        let mut names: Vec<String> = self
            .store
            .terms(id, Taxonomy::Category)
            .await?
            .into_iter()
            .map(|term| term.name)
            .collect();
        names.extend(
            self.store
                .terms(id, Taxonomy::Tag)
                .await?
                .into_iter()
                .map(|term| term.name),
        );
        names.retain(|name| name != "Uncategorized");
        let mut deduped = Vec::new();
        for name in names {
            if !deduped.contains(&name) {
                deduped.push(name);
            }
        }
        Ok(deduped)
    }

    async fn get_author(&self, id: i64) -> Result<Option<MetaValue>> {
        let post = self.require_post(id).await?;
        // 附件可能由某个用户上传，但保留原始作者的元数据
        if !post.is_attachment() {
            if let Some(author) = post.author {
                if let Some(user) = self.store.fetch_user(author).await? {
                    return Ok(Some(Self::author_card(&user)));
                }
            }
        }
        let value = self
            .store
            .read_meta(id, &PropertyKey::Author.meta_key())
            .await?;
        Ok(value.and_then(MetaValue::into_first))
    }

    async fn set_author(&self, id: i64, value: MetaValue) -> Result<()> {
        let post = self.require_post(id).await?;
        if post.is_attachment() {
            self.store
                .write_meta(id, &PropertyKey::Author.meta_key(), value)
                .await?;
        }
        Ok(())
    }

    async fn get_datetime(
        &self,
        id: i64,
        key: &PropertyKey,
    ) -> Result<Option<DateTime<FixedOffset>>> {
        if !key.is_datetime() {
            return Ok(None);
        }
        let post = self.require_post(id).await?;
        // 附件的原生日期是上传时间，不作为published/updated
        if !post.is_attachment() {
            match key {
                PropertyKey::Published => return Ok(Some(post.date)),
                PropertyKey::Updated => return Ok(Some(post.modified)),
                _ => {}
            }
        }
        let Some(value) = self.store.read_meta(id, &key.meta_key()).await? else {
            return Ok(None);
        };
        let Some(first) = value.into_first() else {
            return Ok(None);
        };
        let Some(text) = first.as_str() else {
            return Ok(None);
        };
        Ok(self.parse_datetime_text(text))
    }

    async fn set_datetime(
        &self,
        id: i64,
        key: &PropertyKey,
        value: DateTime<FixedOffset>,
    ) -> Result<()> {
        if !key.is_datetime() {
            return Err(KindsError::InvalidValue(format!(
                "{} is not a datetime property",
                key
            )));
        }
        let post = self.require_post(id).await?;
        if !post.is_attachment()
            && matches!(key, PropertyKey::Published | PropertyKey::Updated)
        {
            let local = value.with_timezone(&self.site.timezone);
            let utc = value.with_timezone(&Utc);
            let update = if *key == PropertyKey::Published {
                PostUpdate {
                    date: Some(local),
                    date_utc: Some(utc),
                    ..Default::default()
                }
            } else {
                PostUpdate {
                    modified: Some(local),
                    modified_utc: Some(utc),
                    ..Default::default()
                }
            };
            self.store.update(id, update).await?;
            return Ok(());
        }
        self.store
            .write_meta(id, &key.meta_key(), MetaValue::Str(value.to_rfc3339()))
            .await?;
        Ok(())
    }

    async fn get_duration(&self, id: i64) -> Result<Option<Mf2Duration>> {
        self.require_post(id).await?;
        let Some(value) = self
            .store
            .read_meta(id, &PropertyKey::Duration.meta_key())
            .await?
        else {
            return Ok(None);
        };
        let first = value.into_first();
        let Some(text) = first.as_ref().and_then(|v| v.as_str()) else {
            return Err(KindsError::InvalidDuration(
                "stored duration is not a string".to_string(),
            ));
        };
        Mf2Duration::parse(text)
            .map(Some)
            .ok_or_else(|| KindsError::InvalidDuration(text.to_string()))
    }

    async fn set_duration(&self, id: i64, value: Mf2Duration) -> Result<()> {
        self.require_post(id).await?;
        self.store
            .write_meta(
                id,
                &PropertyKey::Duration.meta_key(),
                MetaValue::Str(value.to_iso8601()),
            )
            .await?;
        Ok(())
    }

    async fn get_html(&self, id: i64, key: &PropertyKey) -> Result<Option<HtmlContent>> {
        let post = self.require_post(id).await?;
        let content = match key {
            PropertyKey::Content => post.content,
            PropertyKey::Summary => post.excerpt,
            _ => return Ok(None),
        };
        if content.is_empty() {
            return Ok(None);
        }
        let value = media::strip_tags(&content);
        Ok(Some(HtmlContent {
            html: content,
            value,
        }))
    }

    async fn get_photo(&self, id: i64, content_aware: bool) -> Result<Option<Vec<i64>>> {
        let post = self.require_post(id).await?;
        if post.media_category() == Some(MediaCategory::Image) {
            return Ok(Some(vec![post.id]));
        }
        let content_ids = self.content_media_ids(&post, MediaCategory::Image).await?;
        // 正文里已有图片时不再重复报告
        if !content_ids.is_empty() && content_aware {
            return Ok(Some(Vec::new()));
        }
        // 特色图片和photo属性互斥
        if self.get_featured(id).await?.is_some() {
            return Ok(Some(Vec::new()));
        }
        let mut ids = self.store.attached_media(id, MediaCategory::Image).await?;
        if let Some(photos) = self
            .store
            .read_meta(id, "mf2_photo")
            .await?
        {
            for resolved in self.attachments_from_urls(&photos).await? {
                Self::push_unique(&mut ids, resolved);
            }
        }
        for content_id in content_ids {
            Self::push_unique(&mut ids, content_id);
        }
        if ids.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ids))
        }
    }

    async fn get_audio(&self, id: i64, content_aware: bool) -> Result<Option<AudioSources>> {
        let post = self.require_post(id).await?;
        if post.media_category() == Some(MediaCategory::Audio) {
            return Ok(Some(AudioSources::Attachments(vec![post.id])));
        }
        let content_ids = self.content_media_ids(&post, MediaCategory::Audio).await?;
        if !content_ids.is_empty() && content_aware {
            return Ok(Some(AudioSources::Attachments(Vec::new())));
        }
        let mut ids = self.store.attached_media(id, MediaCategory::Audio).await?;
        let audios = self.store.read_meta(id, "mf2_audio").await?;
        if let Some(value) = &audios {
            for resolved in self.attachments_from_urls(value).await? {
                Self::push_unique(&mut ids, resolved);
            }
        }
        for content_id in content_ids {
            Self::push_unique(&mut ids, content_id);
        }
        if !ids.is_empty() {
            return Ok(Some(AudioSources::Attachments(ids)));
        }
        // 只有无法解析的外部URL时原样返回
        match audios {
            Some(value) if !value.is_empty() => {
                let rows = match value {
                    MetaValue::List(items) => items,
                    other => vec![other],
                };
                Ok(Some(AudioSources::External(rows)))
            }
            _ => Ok(None),
        }
    }

    async fn get_video(&self, id: i64, content_aware: bool) -> Result<Option<Vec<i64>>> {
        let post = self.require_post(id).await?;
        if post.media_category() == Some(MediaCategory::Video) {
            return Ok(Some(vec![post.id]));
        }
        let content_ids = self.content_media_ids(&post, MediaCategory::Video).await?;
        if !content_ids.is_empty() && content_aware {
            return Ok(Some(Vec::new()));
        }
        let mut ids = self.store.attached_media(id, MediaCategory::Video).await?;
        if let Some(videos) = self.store.read_meta(id, "mf2_video").await? {
            for resolved in self.attachments_from_urls(&videos).await? {
                Self::push_unique(&mut ids, resolved);
            }
        }
        for content_id in content_ids {
            Self::push_unique(&mut ids, content_id);
        }
        if ids.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ids))
        }
    }

    async fn get_attached_media(&self, id: i64, category: MediaCategory) -> Result<Vec<i64>> {
        self.require_post(id).await?;
        Ok(self.store.attached_media(id, category).await?)
    }

    async fn get_cite(&self, id: i64) -> Result<Option<MetaValue>> {
        let post = self.require_post(id).await?;
        if post.is_attachment() {
            let mut cite = IndexMap::new();
            if let Some(name) = Self::name_of(&post) {
                cite.insert("name".to_string(), MetaValue::Str(name));
            }
            if let Some(url) = post.file_url.clone() {
                cite.insert("url".to_string(), MetaValue::Str(url));
            }
            if let Some(summary) = self.get_html(id, &PropertyKey::Summary).await? {
                let mut summary_map = IndexMap::new();
                summary_map.insert("html".to_string(), MetaValue::Str(summary.html));
                summary_map.insert("value".to_string(), MetaValue::Str(summary.value));
                cite.insert("summary".to_string(), MetaValue::Map(summary_map));
            }
            if let Some(published) = self.get_datetime(id, &PropertyKey::Published).await? {
                cite.insert("published".to_string(), MetaValue::Str(published.to_rfc3339()));
            }
            if cite.is_empty() {
                return Ok(None);
            }
            return Ok(Some(MetaValue::Map(cite)));
        }
        let Some(kind) = self.get_kind(id).await? else {
            return Ok(None);
        };
        let Some(property) = kind.cite_property() else {
            return Ok(None);
        };
        let key = PropertyKey::Other(property.to_string());
        match self.get(id, &key, true).await? {
            Some(PropertyValue::Value(value)) => Ok(Some(value)),
            _ => Ok(None),
        }
    }
}
