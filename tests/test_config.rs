//! Configuration layering: defaults, documents, environment and call site

use dbmodelgen::{
    ArgumentOverrides, ConfigDocument, DefaultConfig, GenError, GenerationConfig, Invocation,
};
use std::fs;
use std::path::PathBuf;

fn resolve(document: &ConfigDocument) -> dbmodelgen::Result<Invocation> {
    Invocation::resolve(
        &DefaultConfig::builtin(),
        document,
        &ArgumentOverrides::default(),
        &ArgumentOverrides::default(),
    )
}

#[test]
fn test_empty_document_yields_builtin_defaults() {
    let invocation = resolve(&ConfigDocument::empty()).unwrap();
    assert_eq!(invocation.config, GenerationConfig::standard());
    assert!(!invocation.args.classic_sqlalchemy);
}

#[test]
fn test_partial_override_keeps_sibling_keys() {
    let document = ConfigDocument::from_json_str(
        r#"{"model": {"type_mapping": {"text": "db.UnicodeText"}, "base_class": "BaseModel"}}"#,
    )
    .unwrap();
    let config = resolve(&document).unwrap().config;
    assert_eq!(config.model.base_class, "BaseModel");
    assert_eq!(config.model.type_mapping["text"], "db.UnicodeText");
    assert_eq!(config.model.type_mapping["integer"], "db.Integer");
    assert_eq!(config.form, GenerationConfig::standard().form);
}

#[test]
fn test_classic_flag_in_document_switches_base() {
    let document = ConfigDocument::from_json_str(
        r#"{"arguments": {"classic_sqlalchemy": true}, "model": {"base_class": "Entity"}}"#,
    )
    .unwrap();
    let invocation = resolve(&document).unwrap();
    assert!(invocation.args.classic_sqlalchemy);
    assert_eq!(invocation.config.model.base_class, "Entity");
    assert_eq!(invocation.config.model.column_class, "Column");
    assert!(invocation.config.model.exclude_primary_key);
}

#[test]
fn test_call_site_beats_document_beats_environment() {
    let document = ConfigDocument::from_json_str(
        r#"{"arguments": {"table_name": "from_file", "submit": "File"}}"#,
    )
    .unwrap();
    let env = ArgumentOverrides::from_env_pairs([
        ("TABLE_NAME", "from_env"),
        ("DATABASE_URL", "env.db"),
        ("SUBMIT", "Env"),
    ])
    .unwrap();
    let call_site = ArgumentOverrides {
        submit: Some("Call".to_string()),
        ..Default::default()
    };

    let invocation =
        Invocation::resolve(&DefaultConfig::builtin(), &document, &env, &call_site).unwrap();
    let args = &invocation.args;
    assert_eq!(args.database_url.as_deref(), Some("env.db"));
    assert_eq!(args.table_name.as_deref(), Some("from_file"));
    assert_eq!(args.submit.as_deref(), Some("Call"));
}

#[test]
fn test_aliases_in_arguments_block() {
    let document = ConfigDocument::from_json_str(
        r#"{"arguments": {"database": "app.db", "output": "out/models.py"}}"#,
    )
    .unwrap();
    let args = resolve(&document).unwrap().args;
    assert_eq!(args.database_url.as_deref(), Some("app.db"));
    assert_eq!(args.output_path_for("users"), PathBuf::from("out/models.py"));
}

#[test]
fn test_malformed_document_is_a_parse_error() {
    assert!(matches!(
        ConfigDocument::from_json_str("{\"model\": "),
        Err(GenError::ConfigParse(_))
    ));
    assert!(matches!(
        ConfigDocument::from_toml_str("[model\nbase_class = 1"),
        Err(GenError::ConfigParse(_))
    ));
}

#[test]
fn test_wrong_kind_is_a_shape_error() {
    let document =
        ConfigDocument::from_json_str(r#"{"model": {"imports": "not a list"}}"#).unwrap();
    assert!(matches!(resolve(&document), Err(GenError::ConfigShape(_))));

    let document = ConfigDocument::from_json_str(r#"{"form": []}"#).unwrap();
    assert!(matches!(resolve(&document), Err(GenError::ConfigShape(_))));
}

#[test]
fn test_contradictory_flags_are_rejected() {
    let document = ConfigDocument::from_json_str(
        r#"{"arguments": {"only_model": true, "only_form": true}}"#,
    )
    .unwrap();
    assert!(matches!(
        resolve(&document),
        Err(GenError::InvalidArguments(_))
    ));
}

#[test]
fn test_load_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dbmodelgen.toml");
    fs::write(
        &path,
        r#"
[arguments]
tab = true

[form]
submit_field = "ButtonField"

[form.meta]
csrf = false
"#,
    )
    .unwrap();

    let invocation = resolve(&ConfigDocument::load(&path).unwrap()).unwrap();
    assert!(invocation.args.tab);
    assert_eq!(invocation.config.form.submit_field, "ButtonField");
    assert_eq!(invocation.config.form.meta["csrf"], serde_json::json!(false));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let document = ConfigDocument::load(&dir.path().join("absent.json")).unwrap();
    assert_eq!(resolve(&document).unwrap().config, GenerationConfig::standard());
}

#[test]
fn test_duplicate_imports_collapse() {
    let document = ConfigDocument::from_json_str(
        r#"{"model": {"imports": ["import os", "import os", "from datetime import datetime"]}}"#,
    )
    .unwrap();
    let config = resolve(&document).unwrap().config;
    assert_eq!(
        config.model.imports,
        vec!["import os".to_string(), "from datetime import datetime".to_string()]
    );
}
