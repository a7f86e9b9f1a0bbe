mod builder;
mod cache;
mod document;
mod markdown;
mod paths;
pub mod pipeline;
mod render;
pub mod source;
mod watch;

pub use builder::Builder;
pub use watch::ChangePoller;
