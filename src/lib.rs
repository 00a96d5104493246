//! dbmodelgen
//!
//! Generates a SQLAlchemy model class and a matching WTForms form class
//! from the schema of one relational table.
//!
//! The pipeline is:
//!
//! 1. a [`schema::SchemaSource`] describes the table as a [`TableDescriptor`];
//! 2. [`config::resolve`] merges the user's configuration over the built-in
//!    defaults into a [`GenerationConfig`];
//! 3. [`emit::emit_model`] and [`emit::emit_form`] produce source text, with
//!    form labels optionally passed through a [`translate::LabelTranslator`];
//! 4. [`format::format`] applies the indentation style.
//!
//! [`generator::Generator`] runs steps 3 and 4 for whichever artifacts the
//! [`ArgumentsConfig`] requests.
//!
//! ```
//! use dbmodelgen::{ArgumentsConfig, ColumnDescriptor, GenerationConfig, Generator, SemanticType, TableDescriptor};
//!
//! let table = TableDescriptor::new(
//!     "users",
//!     vec![
//!         ColumnDescriptor::new("id", SemanticType::Integer).primary_key(),
//!         ColumnDescriptor::new("email", SemanticType::String).not_null(),
//!     ],
//! );
//! let config = GenerationConfig::standard();
//! let args = ArgumentsConfig::default();
//! let sources = Generator::new(&config, &args).generate(&table, None);
//! assert!(sources.form.unwrap().contains("validators=[DataRequired(), Email()]"));
//! ```

pub mod config;
pub mod emit;
pub mod error;
pub mod format;
pub mod generator;
pub mod naming;
pub mod schema;
pub mod translate;
pub mod types;
pub mod validators;

pub use config::{
    ArgumentOverrides, ArgumentsConfig, ConfigDocument, DefaultConfig, FormConfig,
    GenerationConfig, ModelConfig,
};
pub use error::{GenError, Result};
pub use generator::{GeneratedSources, Generator, Invocation};
pub use schema::{open_source, ColumnDescriptor, SchemaSource, SemanticType, TableDescriptor};
pub use translate::{LabelTranslation, LabelTranslator, TranslationError};
