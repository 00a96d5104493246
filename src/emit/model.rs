//! Declarative data-model class emission

use super::python::{attribute_name, default_argument, string_literal};
use super::SourceWriter;
use crate::config::{GenerationConfig, ModelConfig};
use crate::naming::{to_class_name, Artifact};
use crate::schema::{ColumnDescriptor, TableDescriptor};
use crate::types::{map_type, TypeToken};

/// Emit the model class for `table`
///
/// Columns appear in schema order; excluded columns never appear. The
/// `__repr__` hook refers to the table's primary key (`id` when it has none),
/// even when that column is itself excluded.
pub fn emit_model(table: &TableDescriptor, config: &GenerationConfig, force_rename: bool) -> String {
    let model = &config.model;
    let class_name = to_class_name(&table.name, force_rename, Artifact::Model);
    let key_name = table
        .primary_key()
        .map(|c| c.name.as_str())
        .unwrap_or("id");

    let mut w = SourceWriter::new();
    w.imports(&model.imports);
    if !model.preamble.is_empty() {
        for line in &model.preamble {
            w.line(0, line);
        }
        w.blank();
    }
    w.exports(&class_name);

    w.line(0, &format!("class {}({}):", class_name, model.base_class));
    w.line(1, &format!("__tablename__ = {}", string_literal(&table.name)));

    let mut emitted = 0;
    for column in table.columns.iter().filter(|c| !model.is_excluded(c)) {
        w.line(1, &field_line(model, column));
        emitted += 1;
    }
    log::debug!(
        "Model {}: {} field(s) from {} column(s)",
        class_name,
        emitted,
        table.columns.len()
    );

    w.blank();
    w.line(1, "def __repr__(self):");
    w.line(
        2,
        &format!("return f'<{} {{self.{}}}>'", class_name, attribute_name(key_name)),
    );
    w.finish()
}

fn field_line(model: &ModelConfig, column: &ColumnDescriptor) -> String {
    let (token, unmapped) = match map_type(&model.type_mapping, column.semantic_type) {
        TypeToken::Mapped(token) => (token, false),
        TypeToken::Unknown => (model.fallback_type.as_str(), true),
    };
    let type_expr = match column.max_length {
        Some(length) if column.semantic_type.is_string_like() && !unmapped => {
            format!("{}({})", token, length)
        }
        _ => token.to_string(),
    };

    // The real column name goes first when the attribute had to be renamed
    let attribute = attribute_name(&column.name);
    let mut args = Vec::new();
    if attribute != column.name.as_str() {
        args.push(string_literal(&column.name));
    }
    args.push(type_expr);
    if column.primary_key {
        args.push("primary_key=True".to_string());
    } else if !column.nullable {
        args.push("nullable=False".to_string());
    }
    if let Some(default) = column
        .default
        .as_deref()
        .and_then(|raw| default_argument(raw, &model.sql_expression))
    {
        args.push(default);
    }

    let mut line = format!("{} = {}({})", attribute, model.column_class, args.join(", "));
    if unmapped {
        line.push_str(&format!("  # unmapped type: {}", column.native_type));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SemanticType;

    fn users() -> TableDescriptor {
        TableDescriptor::new(
            "users",
            vec![
                ColumnDescriptor::new("id", SemanticType::Integer).primary_key(),
                ColumnDescriptor::new("username", SemanticType::String)
                    .not_null()
                    .with_length(80),
                ColumnDescriptor::new("bio", SemanticType::Text),
                ColumnDescriptor::new("created_at", SemanticType::Datetime)
                    .with_default("CURRENT_TIMESTAMP"),
            ],
        )
    }

    #[test]
    fn test_standard_model_layout() {
        let code = emit_model(&users(), &GenerationConfig::standard(), false);
        let expected = "\
from flask_sqlalchemy import SQLAlchemy
from datetime import datetime

db = SQLAlchemy()

__all__ = ['Users']


class Users(db.Model):
    __tablename__ = 'users'
    id = db.Column(db.Integer, primary_key=True)
    username = db.Column(db.String(80), nullable=False)
    bio = db.Column(db.Text)

    def __repr__(self):
        return f'<Users {self.id}>'
";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_classic_model_uses_plain_column() {
        let code = emit_model(&users(), &GenerationConfig::classic(), false);
        assert!(code.contains("class Users(Base):"));
        assert!(code.contains("    username = Column(String(80), nullable=False)\n"));
        assert!(!code.contains("db = SQLAlchemy()"));
        assert!(!code.contains("    id = "));
        assert!(code.contains("return f'<Users {self.id}>'"));
    }

    #[test]
    fn test_unknown_type_degrades_to_fallback_with_marker() {
        let table = TableDescriptor::new(
            "files",
            vec![ColumnDescriptor::from_native("payload", "BLOB")],
        );
        let code = emit_model(&table, &GenerationConfig::standard(), false);
        assert!(code.contains("    payload = db.Column(db.String)  # unmapped type: BLOB\n"));
    }

    #[test]
    fn test_defaults_are_rendered() {
        let mut config = GenerationConfig::standard();
        config.model.exclude_columns.clear();
        let code = emit_model(&users(), &config, false);
        assert!(code.contains(
            "    created_at = db.Column(db.DateTime, server_default=db.text('CURRENT_TIMESTAMP'))\n"
        ));
    }

    #[test]
    fn test_all_columns_excluded_still_emits_boilerplate() {
        let table = TableDescriptor::new(
            "audit",
            vec![
                ColumnDescriptor::new("created_at", SemanticType::Datetime),
                ColumnDescriptor::new("updated_at", SemanticType::Datetime),
            ],
        );
        let code = emit_model(&table, &GenerationConfig::standard(), true);
        assert!(code.contains("class Model(db.Model):\n    __tablename__ = 'audit'\n\n"));
        assert!(code.contains("return f'<Model {self.id}>'"));
    }

    #[test]
    fn test_unusable_column_names_get_valid_attributes() {
        let table = TableDescriptor::new(
            "people",
            vec![
                ColumnDescriptor::new("person id", SemanticType::Integer).primary_key(),
                ColumnDescriptor::new("first name", SemanticType::String),
                ColumnDescriptor::new("class", SemanticType::String).not_null(),
            ],
        );
        let code = emit_model(&table, &GenerationConfig::standard(), false);
        assert!(code.contains(
            "    person_id = db.Column('person id', db.Integer, primary_key=True)\n"
        ));
        assert!(code.contains("    first_name = db.Column('first name', db.String)\n"));
        assert!(code.contains("    class_ = db.Column('class', db.String, nullable=False)\n"));
        assert!(code.contains("return f'<People {self.person_id}>'"));
        assert!(!code.contains("first name ="));
    }

    #[test]
    fn test_repr_uses_actual_primary_key() {
        let table = TableDescriptor::new(
            "tags",
            vec![ColumnDescriptor::new("slug", SemanticType::String).primary_key()],
        );
        let code = emit_model(&table, &GenerationConfig::standard(), false);
        assert!(code.contains("return f'<Tags {self.slug}>'"));
    }
}
