use crate::database::entity::{post, post_meta, term, user};
use async_trait::async_trait;
use kinds_api::{
    MediaCategory, MetaValue, Post, PostStore, PostType, PostUpdate, Taxonomy, Term, User,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

/// SeaOrmPostStore 使用Sea-ORM实现的Post存储
///
/// 元数据值以JSON文本保存，同一键的多行在读取时合并为List。
pub struct SeaOrmPostStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPostStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn post_from_model(model: post::Model) -> Post {
        Post {
            id: model.id,
            post_type: if model.post_type == "attachment" {
                PostType::Attachment
            } else {
                PostType::Standard
            },
            title: model.title,
            content: model.content,
            excerpt: model.excerpt,
            author: model.author,
            date: model.date,
            date_utc: model.date_utc,
            modified: model.modified,
            modified_utc: model.modified_utc,
            mime_type: model.mime_type,
            featured: model.featured,
            parent: model.parent,
            permalink: model.permalink,
            file_url: model.file_url,
        }
    }

    fn post_type_text(post_type: PostType) -> &'static str {
        match post_type {
            PostType::Standard => "standard",
            PostType::Attachment => "attachment",
        }
    }

    fn meta_from_text(text: &str) -> MetaValue {
        // 旧数据可能是纯文本而不是JSON
        serde_json::from_str(text).unwrap_or_else(|_| MetaValue::Str(text.to_string()))
    }
}

#[async_trait]
impl PostStore for SeaOrmPostStore {
    async fn fetch(&self, id: i64) -> Result<Option<Post>, Box<dyn std::error::Error + Send + Sync>> {
        let model = post::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        Ok(model.map(Self::post_from_model))
    }

    async fn update(&self, id: i64, update: PostUpdate) -> Result<Post, Box<dyn std::error::Error + Send + Sync>> {
        let model = post::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        let Some(model) = model else {
            return Err(format!("Post not found: {}", id).into());
        };

        let mut active: post::ActiveModel = model.into();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(content) = update.content {
            active.content = Set(content);
        }
        if let Some(excerpt) = update.excerpt {
            active.excerpt = Set(excerpt);
        }
        if let Some(date) = update.date {
            active.date = Set(date);
        }
        if let Some(date_utc) = update.date_utc {
            active.date_utc = Set(date_utc);
        }
        if let Some(modified) = update.modified {
            active.modified = Set(modified);
        }
        if let Some(modified_utc) = update.modified_utc {
            active.modified_utc = Set(modified_utc);
        }
        if let Some(featured) = update.featured {
            active.featured = Set(Some(featured));
        }

        let model = active
            .update(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        Ok(Self::post_from_model(model))
    }

    async fn resolve_permalink(&self, url: &str) -> Result<Option<i64>, Box<dyn std::error::Error + Send + Sync>> {
        let model = post::Entity::find()
            .filter(post::Column::Permalink.eq(url))
            .one(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        Ok(model.map(|m| m.id))
    }

    async fn resolve_attachment_url(&self, url: &str) -> Result<Option<i64>, Box<dyn std::error::Error + Send + Sync>> {
        let model = post::Entity::find()
            .filter(post::Column::PostType.eq(Self::post_type_text(PostType::Attachment)))
            .filter(post::Column::FileUrl.eq(url))
            .one(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        Ok(model.map(|m| m.id))
    }

    async fn read_meta(&self, id: i64, key: &str) -> Result<Option<MetaValue>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = post_meta::Entity::find()
            .filter(post_meta::Column::PostId.eq(id))
            .filter(post_meta::Column::MetaKey.eq(key))
            .order_by_asc(post_meta::Column::Id)
            .all(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

        let mut values: Vec<MetaValue> = rows
            .iter()
            .map(|row| Self::meta_from_text(&row.meta_value))
            .collect();
        Ok(match values.len() {
            0 => None,
            1 => values.pop(),
            _ => Some(MetaValue::List(values)),
        })
    }

    async fn write_meta(&self, id: i64, key: &str, value: MetaValue) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let text = serde_json::to_string(&value)
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

        post_meta::Entity::delete_many()
            .filter(post_meta::Column::PostId.eq(id))
            .filter(post_meta::Column::MetaKey.eq(key))
            .exec(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

        let row = post_meta::ActiveModel {
            post_id: Set(id),
            meta_key: Set(key.to_string()),
            meta_value: Set(text),
            ..Default::default()
        };
        post_meta::Entity::insert(row)
            .exec(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        Ok(())
    }

    async fn delete_meta(&self, id: i64, key: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        post_meta::Entity::delete_many()
            .filter(post_meta::Column::PostId.eq(id))
            .filter(post_meta::Column::MetaKey.eq(key))
            .exec(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        Ok(())
    }

    async fn terms(&self, id: i64, taxonomy: Taxonomy) -> Result<Vec<Term>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = term::Entity::find()
            .filter(term::Column::PostId.eq(id))
            .filter(term::Column::Taxonomy.eq(taxonomy.as_str()))
            .order_by_asc(term::Column::Id)
            .all(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        Ok(rows
            .into_iter()
            .map(|row| Term::new(row.name, row.slug))
            .collect())
    }

    async fn attached_media(&self, id: i64, category: MediaCategory) -> Result<Vec<i64>, Box<dyn std::error::Error + Send + Sync>> {
        let pattern = format!("{}/%", category.as_str());
        let rows = post::Entity::find()
            .filter(post::Column::Parent.eq(id))
            .filter(post::Column::PostType.eq(Self::post_type_text(PostType::Attachment)))
            .filter(post::Column::MimeType.like(&pattern))
            .order_by_asc(post::Column::Id)
            .all(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        Ok(rows.into_iter().map(|m| m.id).collect())
    }

    async fn fetch_user(&self, id: i64) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>> {
        let model = user::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
        Ok(model.map(|m| User {
            id: m.id,
            display_name: m.display_name,
            url: m.url,
            avatar: m.avatar,
            archive_url: m.archive_url,
        }))
    }
}
