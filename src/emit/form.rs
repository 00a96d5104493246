//! Web-form class emission

use super::python::{attribute_name, meta_value, string_literal};
use super::SourceWriter;
use crate::config::GenerationConfig;
use crate::naming::{to_class_name, to_field_label, Artifact};
use crate::schema::TableDescriptor;
use crate::translate::LabelTranslation;
use crate::types::{map_type, TypeToken};
use crate::validators::resolve_validators;

/// Per-invocation inputs to [`emit_form`] besides the table and config
#[derive(Clone, Copy, Default)]
pub struct FormOptions<'a> {
    /// Name the class `Form` regardless of the table
    pub force_rename: bool,
    /// Submit button text, used verbatim; no submit field when `None`
    pub submit: Option<&'a str>,
    pub labels: LabelTranslation<'a>,
}

/// Emit the form class for `table`
///
/// The primary key, excluded columns and columns whose type has no field
/// mapping are left out; the latter get a comment line in their place.
pub fn emit_form(table: &TableDescriptor, config: &GenerationConfig, options: &FormOptions<'_>) -> String {
    let form = &config.form;
    let class_name = to_class_name(&table.name, options.force_rename, Artifact::Form);

    let mut w = SourceWriter::new();
    w.imports(&form.imports);
    w.exports(&class_name);
    w.line(0, &format!("class {}({}):", class_name, form.base_class));

    let mut has_body = false;
    for column in &table.columns {
        if column.primary_key || config.model.is_excluded(column) {
            continue;
        }

        let field = match map_type(&form.field_mapping, column.semantic_type) {
            TypeToken::Mapped(field) => field,
            TypeToken::Unknown => {
                w.line(
                    1,
                    &format!(
                        "# {}: no form field for type {}",
                        column.name, column.native_type
                    ),
                );
                continue;
            }
        };

        let attribute = attribute_name(&column.name);
        let label = options.labels.apply(&to_field_label(&column.name));
        let validators = resolve_validators(config, column);
        let line = if validators.is_empty() {
            format!("{} = {}({})", attribute, field, string_literal(&label))
        } else {
            format!(
                "{} = {}({}, validators=[{}])",
                attribute,
                field,
                string_literal(&label),
                validators.join(", ")
            )
        };
        w.line(1, &line);
        has_body = true;
    }

    if let Some(submit) = options.submit {
        w.line(
            1,
            &format!("submit = {}({})", form.submit_field, string_literal(submit)),
        );
        has_body = true;
    }

    if !form.meta.is_empty() {
        if has_body {
            w.blank();
        }
        w.line(1, "class Meta:");
        for (key, value) in &form.meta {
            w.line(2, &format!("{} = {}", key, meta_value(value)));
        }
        has_body = true;
    }

    if !has_body {
        w.line(1, "pass");
    }
    w.finish()
}
