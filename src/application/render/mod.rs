//! Content pipeline: markdown source to a sanitised, templated HTML page.
//!
//! The markdown and sanitise stages live behind [`RenderService`] and are
//! pure. [`PreviewPipeline`] adds input reading and page templating on top.

mod pipeline;
mod service;
mod template;
mod types;

pub use pipeline::PreviewPipeline;
pub use service::{ComrakRenderService, render_service};
pub use template::{PageTemplate, RenderContext, TITLE};
pub use types::{
    RenderError, RenderOutput, RenderRequest, RenderService, SanitizedHtml, TemplateError,
};
