//! Render pipeline: data block → context, template → preprocessor →
//! minijinja → output string.
//!
//! Environments are built explicitly with [`build_environment`] and passed to
//! the render functions; there is no shared global environment, so separate
//! renders (and tests) never see each other's configuration.

use crate::data::{parse_context, DataFormat};
use crate::error::Result;
use crate::filters;
use crate::preprocess::preprocess;
use log::debug;
use minijinja::value::Value;
use minijinja::{Environment, UndefinedBehavior};
use std::borrow::Cow;

/// Build a fresh environment with `slice`, `substring` and `dump` registered.
///
/// The custom `slice` replaces minijinja's built-in filter of the same name.
pub fn build_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_filter("slice", filters::slice);
    env.add_filter("substring", filters::substring);
    env.add_filter("dump", filters::dump);
    env
}

/// Preprocess `template`, then render it against a data block.
///
/// The data block is parsed first; if it is malformed nothing is rendered.
///
/// # Errors
///
/// Returns a data error if `data` does not parse as `format`, or a template
/// error if the rewritten template fails to compile or evaluate.
///
/// # Examples
///
/// ```
/// use slicetpl_core::{build_environment, render_preview, DataFormat};
///
/// let env = build_environment();
/// let out = render_preview(&env, "Hello {{ name[1:-1] }}", r#"{"name":"World"}"#, DataFormat::Json).unwrap();
/// assert_eq!(out, "Hello orl");
/// ```
pub fn render_preview(env: &Environment<'_>, template: &str, data: &str, format: DataFormat) -> Result<String> {
    let ctx = parse_context(data, format)?;
    let rewritten = preprocess(template);
    Ok(env.render_str(&rewritten, ctx)?)
}

/// Toggles applied by a [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Rewrite bracket slices before compiling. On by default.
    pub preprocess: bool,
    /// Fail on undefined variables instead of rendering them as empty.
    pub strict_undefined: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preprocess: true,
            strict_undefined: false,
        }
    }
}

/// An environment bundled with the options it renders under.
pub struct Renderer {
    env: Environment<'static>,
    options: RenderOptions,
}

impl Renderer {
    /// Build a renderer over a fresh [`build_environment`].
    pub fn new(options: RenderOptions) -> Self {
        Self::with_environment(build_environment(), options)
    }

    /// Wrap an existing environment, e.g. one with extra filters registered.
    pub fn with_environment(mut env: Environment<'static>, options: RenderOptions) -> Self {
        if options.strict_undefined {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }
        Self { env, options }
    }

    /// The underlying minijinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// The options this renderer was built with.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// The template text that will actually be compiled.
    pub fn prepare<'a>(&self, template: &'a str) -> Cow<'a, str> {
        if self.options.preprocess {
            Cow::Owned(preprocess(template))
        } else {
            Cow::Borrowed(template)
        }
    }

    /// Render a template against an already-built context.
    pub fn render(&self, template: &str, ctx: Value) -> Result<String> {
        let source = self.prepare(template);
        debug!("rendering {} bytes of template", source.len());
        Ok(self.env.render_str(&source, ctx)?)
    }

    /// Parse `data` as `format` and render `template` against it.
    pub fn render_data(&self, template: &str, data: &str, format: DataFormat) -> Result<String> {
        let ctx = parse_context(data, format)?;
        self.render(template, ctx)
    }

    /// Evaluate a single expression such as `items[-2:]` against a context.
    pub fn eval(&self, expr: &str, ctx: Value) -> Result<Value> {
        let source = self.prepare(expr);
        debug!("evaluating expression {:?}", source);
        let compiled = self.env.compile_expression(&source)?;
        Ok(compiled.eval(ctx)?)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// The output side of a preview: either the latest render or the error that
/// replaced it.
///
/// A failed refresh clears the output, so a stale render is never shown next
/// to a new error.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Preview {
    output: String,
    error: Option<String>,
}

impl Preview {
    /// An empty preview with no output and no error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-run the whole pipeline on the current inputs.
    ///
    /// Returns `true` if the render succeeded.
    pub fn refresh(&mut self, renderer: &Renderer, template: &str, data: &str, format: DataFormat) -> bool {
        match renderer.render_data(template, data, format) {
            Ok(output) => {
                self.output = output;
                self.error = None;
                true
            }
            Err(err) => {
                debug!("preview failed: {}", err);
                self.output.clear();
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// Output of the last successful refresh, or empty after a failure.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Message of the last failed refresh, if the latest one failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
