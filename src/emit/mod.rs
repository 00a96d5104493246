//! Source emission for the model and form artifacts
//!
//! Emitters never fail: unknown types degrade to comment markers and empty
//! column sets to empty class bodies, so the output is always valid Python.
//! Indentation is four spaces; [`crate::format`] converts to tabs afterwards.

pub mod form;
pub mod model;
pub mod python;

pub use form::{emit_form, FormOptions};
pub use model::emit_model;

const INDENT: &str = "    ";

/// Line-oriented buffer for generated source
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    buf: String,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the given indentation level
    pub fn line(&mut self, level: usize, text: &str) {
        if !text.is_empty() {
            for _ in 0..level {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Import block followed by one blank line; nothing when there are no imports
    pub fn imports(&mut self, imports: &[String]) {
        if imports.is_empty() {
            return;
        }
        for import in imports {
            self.line(0, import);
        }
        self.blank();
    }

    /// `__all__` export list followed by two blank lines
    pub fn exports(&mut self, class_name: &str) {
        self.line(0, &format!("__all__ = [{}]", python::string_literal(class_name)));
        self.blank();
        self.blank();
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
