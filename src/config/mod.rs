//! Configuration module

mod site;

pub use site::ContactConfig;
pub use site::ExcerptConfig;
pub use site::LikesConfig;
pub use site::ReadingConfig;
pub use site::SiteConfig;
