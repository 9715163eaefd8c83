pub mod duration;
pub mod kind;
pub mod site;

pub use duration::Mf2Duration;
pub use kind::Kind;
pub use site::Site;
