pub mod kind_post;
pub mod media;
pub mod property;

pub use kind_post::{
    AudioSources, DefaultKindPostService, HtmlContent, KindPostService, PostTarget, PropertyValue,
};
pub use property::{PropertyKey, MF2_PREFIX};
