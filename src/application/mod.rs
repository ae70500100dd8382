//! Application services: the content pipeline, artifact persistence and the
//! preview workflow tying them together.

pub mod artifact;
pub mod error;
pub mod preview;
pub mod render;
