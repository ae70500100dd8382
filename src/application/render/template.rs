//! Page templates that wrap a sanitised body into a standalone HTML document.
//!
//! Templates are [Handlebars](https://handlebarsjs.com/) documents evaluated in
//! strict mode against a [`RenderContext`]. The context exposes `Filename`,
//! `Title` and `Body`; the body must be emitted with a triple-stash
//! (`{{{Body}}}`) since it is already sanitised HTML.

use std::{fs, path::Path};

use handlebars::Handlebars;
use serde::Serialize;

use crate::application::render::types::{RenderError, SanitizedHtml, TemplateError};
use crate::domain::document::base_name;

/// Title shown for every rendered document.
pub const TITLE: &str = "Markdown Preview Tool";

const BUILTIN_TEMPLATE_NAME: &str = "mdp";

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>

<head>
  <meta http-equiv="content-type" content="text/html; charset=utf-8">
  <title>{{Title}}{{#if Filename}}: {{Filename}}{{/if}}</title>
</head>

<body>
{{{Body}}}
</body>

</html>
"#;

/// Data interpolated into a page template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    #[serde(rename = "Filename")]
    filename: String,
    #[serde(rename = "Title")]
    title: &'static str,
    #[serde(rename = "Body")]
    body: String,
}

impl RenderContext {
    /// Build the context from a display name and an already sanitised body.
    pub fn new(display_name: &str, body: SanitizedHtml) -> Self {
        Self {
            filename: base_name(display_name),
            title: TITLE,
            body: body.into_string(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// A parsed page template ready to execute.
#[derive(Debug)]
pub struct PageTemplate {
    registry: Handlebars<'static>,
    name: String,
}

impl PageTemplate {
    /// The built-in HTML5 page.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_TEMPLATE_NAME, DEFAULT_TEMPLATE)
            .expect("built-in page template must be valid")
    }

    /// Read and parse a user-supplied template file.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&path.display().to_string(), &source)
    }

    /// Use the override when given, the built-in template otherwise. A broken
    /// override is an error; there is no fallback to the built-in page.
    pub fn resolve(override_path: Option<&Path>) -> Result<Self, TemplateError> {
        match override_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the template against the context.
    pub fn render(&self, context: &RenderContext) -> Result<String, RenderError> {
        self.registry
            .render(&self.name, context)
            .map_err(|source| RenderError::TemplateExecution {
                name: self.name.clone(),
                source: Box::new(source),
            })
    }

    fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry
            .register_template_string(name, source)
            .map_err(|source| TemplateError::Parse {
                name: name.to_string(),
                source: Box::new(source),
            })?;

        Ok(Self {
            registry,
            name: name.to_string(),
        })
    }
}
