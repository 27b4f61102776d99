//! Completion service implementations

pub mod http;
pub mod scripted;

pub use http::HttpCompletionService;
pub use scripted::ScriptedCompletionService;
