/// Post实体，对应数据库中的posts表
pub mod post {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "posts")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i64,

        pub post_type: String,

        pub title: String,

        #[sea_orm(column_type = "Text")]
        pub content: String,

        #[sea_orm(column_type = "Text")]
        pub excerpt: String,

        pub author: Option<i64>,

        pub date: DateTimeWithTimeZone,

        pub date_utc: DateTimeUtc,

        pub modified: DateTimeWithTimeZone,

        pub modified_utc: DateTimeUtc,

        pub mime_type: Option<String>,

        pub featured: Option<i64>,

        pub parent: Option<i64>,

        pub permalink: Option<String>,

        pub file_url: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// 元数据实体，对应post_meta表，同一键可有多行
pub mod post_meta {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "post_meta")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        pub post_id: i64,

        pub meta_key: String,

        /// JSON编码的元数据值
        #[sea_orm(column_type = "Text")]
        pub meta_value: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// 分类法词条实体，对应terms表
pub mod term {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "terms")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        pub post_id: i64,

        pub taxonomy: String,

        pub name: String,

        pub slug: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// 用户实体，对应users表
pub mod user {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i64,

        pub display_name: String,

        pub url: Option<String>,

        pub avatar: Option<String>,

        pub archive_url: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
