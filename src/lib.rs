pub mod config;
pub mod contact;
pub mod dom;
pub mod effects;
pub mod engine;
pub mod nav;
pub mod net;
pub mod render;

pub use config::SiteConfig;
pub use engine::Page;
