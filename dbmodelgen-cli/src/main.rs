//! dbmodelgen CLI
//!
//! Reads one table's schema and writes a SQLAlchemy model and/or a WTForms
//! form for it. Arguments may also come from a config document's
//! `arguments` block or an environment file; command-line values win.

mod env;

use clap::{ArgGroup, Parser};
use colored::Colorize;
use dbmodelgen::translate::GoogleTranslator;
use dbmodelgen::{
    open_source, ArgumentOverrides, ConfigDocument, DefaultConfig, GeneratedSources, Invocation,
    LabelTranslator,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "dbmodelgen")]
#[command(about = "Generate SQLAlchemy models and WTForms forms from database tables")]
#[command(version)]
#[command(group(ArgGroup::new("only").args(["only_model", "only_form"])))]
struct Cli {
    /// Database URL or path (sqlite:///app.db, app.db, schema.json)
    database: Option<String>,

    /// Table to generate code for
    table_name: Option<String>,

    /// Output file (default: <table>.py, <table>_model.py or <table>_form.py)
    output: Option<PathBuf>,

    /// Path to a JSON or TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to an environment file (default: ./.env when present)
    #[arg(short, long)]
    env: Option<PathBuf>,

    /// Name the generated classes Model and Form
    #[arg(short = 'r', long)]
    default_rename: bool,

    /// Generate only the model
    #[arg(short = 'm', long)]
    only_model: bool,

    /// Generate only the form
    #[arg(short = 'f', long)]
    only_form: bool,

    /// Generate a plain SQLAlchemy model instead of Flask-SQLAlchemy
    #[arg(short = 's', long)]
    classic_sqlalchemy: bool,

    /// Indent with tabs instead of four spaces
    #[arg(short, long)]
    tab: bool,

    /// Translate form labels into this language code
    #[arg(short = 'l', long)]
    translate_labels: Option<String>,

    /// Language the generated labels are written in
    #[arg(long)]
    label_original_language: Option<String>,

    /// Add a submit button with this text to the form
    #[arg(long)]
    submit: Option<String>,

    /// Print the generated code instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ArgumentOverrides {
        fn flag(set: bool) -> Option<bool> {
            set.then_some(true)
        }

        ArgumentOverrides {
            database_url: self.database.clone(),
            table_name: self.table_name.clone(),
            output_path: self.output.clone(),
            default_rename: flag(self.default_rename),
            only_model: flag(self.only_model),
            only_form: flag(self.only_form),
            classic_sqlalchemy: flag(self.classic_sqlalchemy),
            tab: flag(self.tab),
            translate_labels: self.translate_labels.clone(),
            label_original_language: self.label_original_language.clone(),
            log_mode: flag(self.verbose),
            submit: self.submit.clone(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let prepared = prepare(&cli);

    // Initialize logging
    let log_mode = prepared
        .as_ref()
        .is_ok_and(|prepared| prepared.invocation.args.log_mode);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(&cli, log_mode)))
        .init();

    if let Err(e) = prepared.and_then(|prepared| run(&cli, prepared)) {
        eprintln!("{} {:#}", "❌ Error:".red(), e);
        process::exit(1);
    }
}

/// Default log filter: `--quiet` wins, then `--verbose` or `log_mode`
fn log_filter(cli: &Cli, log_mode: bool) -> &'static str {
    if cli.quiet {
        "error"
    } else if cli.verbose || log_mode {
        "info"
    } else {
        "warn"
    }
}

/// Everything resolved before the logger exists
struct Prepared {
    invocation: Invocation,
    missing_config: Option<PathBuf>,
}

fn prepare(cli: &Cli) -> anyhow::Result<Prepared> {
    let env_file = env::load(cli.env.as_deref())?;

    let config_path = cli.config.clone().or(env_file.config_path.clone());
    let document = match &config_path {
        Some(path) => ConfigDocument::load(path)?,
        None => ConfigDocument::empty(),
    };

    let defaults = DefaultConfig::builtin();
    let invocation = Invocation::resolve(&defaults, &document, &env_file.arguments, &cli.overrides())?;
    Ok(Prepared {
        invocation,
        missing_config: config_path.filter(|path| !path.exists()),
    })
}

fn run(cli: &Cli, prepared: Prepared) -> anyhow::Result<()> {
    if let Some(path) = &prepared.missing_config {
        log::warn!(
            "Configuration file {} does not exist, using defaults",
            path.display()
        );
    }

    let invocation = prepared.invocation;
    let args = &invocation.args;
    let (database_url, table_name) = args.require_target()?;

    let source = open_source(database_url)?;
    let table = source.describe_table(table_name)?;

    let translator = args.translation_target().map(|_| GoogleTranslator::new());
    let sources = invocation
        .generator()
        .generate(&table, translator.as_ref().map(|t| t as &dyn LabelTranslator));

    if cli.stdout {
        print!("{}", sources.render_document());
        return Ok(());
    }

    let output = args.output_path_for(table_name);
    write_output(&output, &sources)?;
    if args.log_mode && !cli.quiet {
        println!("{} {}", "✅ File created:".green(), output.display());
        println!("📝 Generated: {}", sources.artifacts().join(", "));
    }
    Ok(())
}

fn write_output(path: &Path, sources: &GeneratedSources) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, sources.render_document())?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
