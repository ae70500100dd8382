//! Render a markdown document into a standalone, sanitised HTML page and open
//! it in the platform's default viewer.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
