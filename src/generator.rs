//! Orchestration of one generation run
//!
//! [`Invocation::resolve`] turns the raw layers (defaults, config document,
//! environment, call site) into resolved arguments and configuration.
//! [`Generator::generate`] then emits and formats the requested artifacts.

use crate::config::{resolve, ArgumentOverrides, ArgumentsConfig, ConfigDocument, DefaultConfig, GenerationConfig};
use crate::emit::{emit_form, emit_model, FormOptions};
use crate::error::Result;
use crate::format::format;
use crate::schema::TableDescriptor;
use crate::translate::{LabelTranslation, LabelTranslator};

/// Resolved inputs for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub args: ArgumentsConfig,
    pub config: GenerationConfig,
}

impl Invocation {
    /// Resolve arguments (call site > document `arguments` > environment > defaults),
    /// then merge the document over the standard or classic defaults
    pub fn resolve(
        defaults: &DefaultConfig,
        document: &ConfigDocument,
        env: &ArgumentOverrides,
        call_site: &ArgumentOverrides,
    ) -> Result<Self> {
        let file_layer = match document.arguments() {
            Some(value) if !value.is_null() => ArgumentOverrides::from_value(value)?,
            _ => ArgumentOverrides::default(),
        };
        let args = ArgumentsConfig::resolve(&[env, &file_layer, call_site])?;
        let config = resolve(defaults, document, args.classic_sqlalchemy)?;
        Ok(Self { args, config })
    }

    pub fn generator(&self) -> Generator<'_> {
        Generator::new(&self.config, &self.args)
    }
}

/// Emitted artifacts; `None` for the one not requested
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSources {
    pub model: Option<String>,
    pub form: Option<String>,
}

impl GeneratedSources {
    /// Single file holding every generated artifact, model first
    pub fn render_document(&self) -> String {
        let mut doc = String::new();
        if let Some(model) = &self.model {
            doc.push_str("# SQLAlchemy model\n");
            doc.push_str(model);
        }
        if let Some(form) = &self.form {
            if self.model.is_some() {
                doc.push_str("\n\n");
            }
            doc.push_str("# WTForms form\n");
            doc.push_str(form);
        }
        doc
    }

    /// Names of the artifacts present, for status output
    pub fn artifacts(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.model.is_some() {
            names.push("model");
        }
        if self.form.is_some() {
            names.push("form");
        }
        names
    }
}

/// Emits the artifacts requested by the arguments
pub struct Generator<'a> {
    config: &'a GenerationConfig,
    args: &'a ArgumentsConfig,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GenerationConfig, args: &'a ArgumentsConfig) -> Self {
        Self { config, args }
    }

    /// Generate source for `table`
    ///
    /// The translator is only consulted when the arguments request a target
    /// language different from the original one.
    pub fn generate(
        &self,
        table: &TableDescriptor,
        translator: Option<&dyn LabelTranslator>,
    ) -> GeneratedSources {
        let args = self.args;
        args.warn_meaningless();

        let model = args
            .wants_model()
            .then(|| emit_model(table, self.config, args.default_rename));

        let form = args.wants_form().then(|| {
            let labels = match (translator, args.translation_target()) {
                (Some(translator), Some(target)) => {
                    LabelTranslation::new(translator, &args.label_original_language, target)
                }
                _ => LabelTranslation::disabled(),
            };
            let options = FormOptions {
                force_rename: args.default_rename,
                submit: args.submit.as_deref(),
                labels,
            };
            emit_form(table, self.config, &options)
        });

        log::info!(
            "Generated {} for table '{}'",
            [model.as_ref().map(|_| "model"), form.as_ref().map(|_| "form")]
                .iter()
                .flatten()
                .copied()
                .collect::<Vec<_>>()
                .join(" and "),
            table.name
        );

        GeneratedSources {
            model: model.map(|code| format(&code, args.tab)),
            form: form.map(|code| format(&code, args.tab)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDescriptor, SemanticType};

    fn table() -> TableDescriptor {
        TableDescriptor::new(
            "users",
            vec![
                ColumnDescriptor::new("id", SemanticType::Integer).primary_key(),
                ColumnDescriptor::new("name", SemanticType::String),
            ],
        )
    }

    #[test]
    fn test_only_flags_select_artifacts() {
        let config = GenerationConfig::standard();
        let args = ArgumentsConfig {
            only_model: true,
            ..Default::default()
        };
        let out = Generator::new(&config, &args).generate(&table(), None);
        assert!(out.model.is_some());
        assert!(out.form.is_none());
        assert_eq!(out.artifacts(), vec!["model"]);

        let args = ArgumentsConfig {
            only_form: true,
            ..Default::default()
        };
        let out = Generator::new(&config, &args).generate(&table(), None);
        assert!(out.model.is_none());
        assert!(out.form.is_some());
    }

    #[test]
    fn test_render_document_orders_model_first() {
        let sources = GeneratedSources {
            model: Some("M\n".to_string()),
            form: Some("F\n".to_string()),
        };
        assert_eq!(
            sources.render_document(),
            "# SQLAlchemy model\nM\n\n\n# WTForms form\nF\n"
        );
    }

    #[test]
    fn test_tab_flag_applies_to_both_artifacts() {
        let config = GenerationConfig::standard();
        let args = ArgumentsConfig {
            tab: true,
            ..Default::default()
        };
        let out = Generator::new(&config, &args).generate(&table(), None);
        assert!(out.model.unwrap().contains("\n\tid = db.Column"));
        assert!(out.form.unwrap().contains("\n\tname = StringField"));
    }
}
