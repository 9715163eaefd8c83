pub mod error;
pub mod post;
pub mod store;
pub mod term;
pub mod user;
pub mod value;

pub use error::{KindsError, Result};
pub use post::{MediaCategory, Post, PostType, PostUpdate};
pub use store::PostStore;
pub use term::{Taxonomy, Term};
pub use user::User;
pub use value::{collapse_to_single, MetaValue};
