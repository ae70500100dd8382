use std::{io::Read, path::Path, sync::Arc};

use tracing::debug;

use crate::application::render::{
    template::{PageTemplate, RenderContext},
    types::{RenderError, RenderRequest, RenderService},
};

/// Content pipeline: raw markdown bytes in, a complete HTML page out.
pub struct PreviewPipeline {
    renderer: Arc<dyn RenderService>,
}

impl PreviewPipeline {
    pub fn new(renderer: Arc<dyn RenderService>) -> Self {
        Self { renderer }
    }

    /// Read `input` to completion, render and sanitise it, then execute the
    /// resolved page template. Every failure aborts the render.
    pub fn render<R: Read>(
        &self,
        mut input: R,
        template_override: Option<&Path>,
        display_name: &str,
    ) -> Result<Vec<u8>, RenderError> {
        let mut markdown = Vec::new();
        input
            .read_to_end(&mut markdown)
            .map_err(RenderError::Input)?;

        let output = self.renderer.render(&RenderRequest::from_bytes(&markdown))?;

        let template = PageTemplate::resolve(template_override)?;
        let context = RenderContext::new(display_name, output.html);
        let page = template.render(&context)?;

        debug!(
            target = "application::render::pipeline",
            op = "render",
            template = template.name(),
            filename = context.filename(),
            input_bytes = markdown.len(),
            page_bytes = page.len(),
            "Page rendered"
        );

        Ok(page.into_bytes())
    }
}
