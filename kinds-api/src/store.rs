use crate::post::{MediaCategory, Post, PostUpdate};
use crate::term::{Taxonomy, Term};
use crate::user::User;
use crate::value::MetaValue;
use async_trait::async_trait;

/// PostStore trait 定义Post存储的读写操作
///
/// 元数据是按字符串键的开放映射。多值键以List存储，读取时
/// 由调用方决定是否折叠为单值。
#[async_trait]
pub trait PostStore: Send + Sync {
    /// 按ID获取Post
    async fn fetch(&self, id: i64) -> Result<Option<Post>, Box<dyn std::error::Error + Send + Sync>>;

    /// 更新Post的给定字段，返回更新后的Post
    async fn update(&self, id: i64, update: PostUpdate) -> Result<Post, Box<dyn std::error::Error + Send + Sync>>;

    /// 将内容永久链接解析为Post ID
    async fn resolve_permalink(&self, url: &str) -> Result<Option<i64>, Box<dyn std::error::Error + Send + Sync>>;

    /// 将附件文件URL解析为附件ID
    async fn resolve_attachment_url(&self, url: &str) -> Result<Option<i64>, Box<dyn std::error::Error + Send + Sync>>;

    /// 读取元数据值
    async fn read_meta(&self, id: i64, key: &str) -> Result<Option<MetaValue>, Box<dyn std::error::Error + Send + Sync>>;

    /// 写入元数据值，覆盖已有值
    async fn write_meta(&self, id: i64, key: &str, value: MetaValue) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// 删除元数据值
    async fn delete_meta(&self, id: i64, key: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// 获取Post在指定分类法下的词条
    async fn terms(&self, id: i64, taxonomy: Taxonomy) -> Result<Vec<Term>, Box<dyn std::error::Error + Send + Sync>>;

    /// 获取关联到Post的指定类别的附件ID
    async fn attached_media(&self, id: i64, category: MediaCategory) -> Result<Vec<i64>, Box<dyn std::error::Error + Send + Sync>>;

    /// 按ID获取用户
    async fn fetch_user(&self, id: i64) -> Result<Option<User>, Box<dyn std::error::Error + Send + Sync>>;
}
