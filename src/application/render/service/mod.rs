mod config;

use std::sync::Arc;

use comrak::{Arena, format_html, nodes::AstNode, parse_document};
use once_cell::sync::Lazy;
use tracing::debug;

use crate::application::render::types::{
    RenderError, RenderOutput, RenderRequest, RenderService, SanitizedHtml,
};

use config::{build_sanitizer, default_options};

/// Default Comrak-based rendering pipeline with Ammonia sanitisation.
pub struct ComrakRenderService {
    options: comrak::Options<'static>,
    sanitizer: ammonia::Builder<'static>,
}

impl ComrakRenderService {
    /// Construct a renderer with the GFM-style extensions enabled and raw HTML
    /// passed through to the sanitiser.
    fn new() -> Self {
        Self {
            options: default_options(),
            sanitizer: build_sanitizer(),
        }
    }
}

static RENDER_SERVICE: Lazy<Arc<ComrakRenderService>> =
    Lazy::new(|| Arc::new(ComrakRenderService::new()));

/// Access the shared render service instance, initialised on first use.
pub fn render_service() -> Arc<ComrakRenderService> {
    Arc::clone(&RENDER_SERVICE)
}

impl Default for ComrakRenderService {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderService for ComrakRenderService {
    fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, &request.markdown, &self.options);

        let rendered_html = render_html_stage(root, &self.options)?;
        let html = sanitize_stage(&rendered_html, &self.sanitizer);

        debug!(
            target = "application::render::service",
            op = "render",
            markdown_bytes = request.markdown.len(),
            raw_html_bytes = rendered_html.len(),
            sanitized_html_bytes = html.as_str().len(),
            "Markdown rendered and sanitised"
        );

        Ok(RenderOutput { html })
    }
}

fn render_html_stage<'a>(
    root: &'a AstNode<'a>,
    options: &comrak::Options<'static>,
) -> Result<String, RenderError> {
    let mut html = String::new();
    format_html(root, options, &mut html).map_err(|err| RenderError::Markdown {
        message: err.to_string(),
    })?;
    Ok(html)
}

fn sanitize_stage(html: &str, sanitizer: &ammonia::Builder<'static>) -> SanitizedHtml {
    SanitizedHtml::new(sanitizer.clean(html).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> String {
        render_service()
            .render(&RenderRequest::new(markdown))
            .expect("render succeeds")
            .html
            .into_string()
    }

    #[test]
    fn heading_becomes_h1() {
        assert!(render("# Hello").contains("<h1>Hello</h1>"));
    }

    #[test]
    fn gfm_table_survives_sanitising() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn inline_script_is_removed() {
        let html = render("before\n\n<script>alert('x')</script>\n\nafter");
        assert!(!html.contains("<script"));
        assert!(!html.contains("alert"));
        assert!(html.contains("before"));
        assert!(html.contains("after"));
    }

    #[test]
    fn javascript_link_is_neutralised() {
        let html = render("[click](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("click"));
    }

    #[test]
    fn invalid_utf8_renders_as_text() {
        let request = RenderRequest::from_bytes(b"caf\xff *ok*");
        let output = render_service().render(&request).expect("render succeeds");
        assert!(output.html.as_str().contains("<em>ok</em>"));
    }

    #[test]
    fn front_matter_is_not_rendered() {
        let html = render("---\ntitle: hidden\n---\n\nvisible\n");
        assert!(!html.contains("hidden"));
        assert!(html.contains("visible"));
    }
}
