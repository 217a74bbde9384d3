pub mod keyword;
pub mod config;

pub mod dom;
pub mod net;
pub mod analysis;
pub mod engine;
pub mod server;

// Viewer-side state and scene math
pub mod session;
pub mod clipboard;
pub mod render;

pub use keyword::Keyword;
