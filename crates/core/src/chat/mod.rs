//! Conversations about a project

pub mod session;

pub use session::ChatSession;
