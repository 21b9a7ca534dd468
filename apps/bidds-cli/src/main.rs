use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bidds_model::{
    DocumentError, DocumentKind, InputDataFile, ValidationConfig, Validated, load_input,
    load_output, save_input, save_output, save_schema, schema_json,
    validate_output_against_input,
};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bidds")]
#[command(about = "Bid-DS - validate power-grid scheduling input and solution documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more input documents
    Validate {
        /// Paths to input JSON documents
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Validation config (YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Require exactly one component per contingency
        #[arg(long)]
        strict_contingencies: bool,
    },
    /// Validate a solution document, optionally against its input
    ValidateOutput {
        /// Path to the solution JSON document
        output: PathBuf,
        /// Input document the solution answers
        #[arg(long)]
        input: Option<PathBuf>,
        /// Validation config (YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print or save the JSON Schema of a document kind
    Schema {
        /// Document kind (input or output)
        #[arg(long, default_value = "input")]
        kind: DocumentKind,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Load, validate and re-save a document in canonical form
    Normalize {
        /// Document to read
        input: PathBuf,
        /// Destination path
        out: PathBuf,
        /// Document kind (input or output)
        #[arg(long, default_value = "input")]
        kind: DocumentKind,
    },
    /// Show record counts of an input document
    Summary {
        /// Path to the input JSON document
        input: PathBuf,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("{failed} of {total} documents failed validation")]
    Rejected { failed: usize, total: usize },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            files,
            config,
            strict_contingencies,
        } => cmd_validate(&files, config.as_deref(), strict_contingencies),
        Commands::ValidateOutput {
            output,
            input,
            config,
        } => cmd_validate_output(&output, input.as_deref(), config.as_deref()),
        Commands::Schema { kind, out } => cmd_schema(kind, out.as_deref()),
        Commands::Normalize { input, out, kind } => cmd_normalize(&input, &out, kind),
        Commands::Summary { input } => cmd_summary(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(path: Option<&Path>, strict_contingencies: bool) -> CliResult<ValidationConfig> {
    let mut config = match path {
        Some(path) => ValidationConfig::load(path)?,
        None => ValidationConfig::default(),
    };
    if strict_contingencies {
        config.single_component_contingencies = true;
    }
    Ok(config)
}

fn print_failure(path: &Path, error: &DocumentError) {
    println!("✗ {}", path.display());
    match error.report() {
        Some(report) => {
            for err in report.iter() {
                println!("    {}", err);
            }
        }
        None => println!("    {}", error),
    }
}

fn cmd_validate(files: &[PathBuf], config: Option<&Path>, strict_contingencies: bool) -> CliResult<()> {
    let config = resolve_config(config, strict_contingencies)?;
    tracing::debug!(files = files.len(), ?config, "validating input documents");

    let results: Vec<(&PathBuf, Result<Validated<InputDataFile>, DocumentError>)> = files
        .par_iter()
        .map(|path| (path, load_input(path, &config)))
        .collect();

    let mut failed = 0;
    for (path, result) in &results {
        match result {
            Ok(_) => println!("✓ {}", path.display()),
            Err(e) => {
                failed += 1;
                print_failure(path, e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Rejected {
            failed,
            total: files.len(),
        });
    }
    Ok(())
}

fn cmd_validate_output(output: &Path, input: Option<&Path>, config: Option<&Path>) -> CliResult<()> {
    let config = resolve_config(config, false)?;

    let solution = match load_output(output, &config) {
        Ok(solution) => solution,
        Err(e) => {
            print_failure(output, &e);
            return Err(CliError::Rejected { failed: 1, total: 1 });
        }
    };

    if let Some(input) = input {
        let problem = load_input(input, &config)?;
        if let Err(report) = validate_output_against_input(&solution, &problem) {
            print_failure(output, &DocumentError::Validation(report));
            return Err(CliError::Rejected { failed: 1, total: 1 });
        }
    }

    println!("✓ {}", output.display());
    Ok(())
}

fn cmd_schema(kind: DocumentKind, out: Option<&Path>) -> CliResult<()> {
    match out {
        Some(path) => {
            save_schema(kind, path)?;
            println!("✓ Wrote {:?} schema to {}", kind, path.display());
        }
        None => println!("{}", schema_json(kind)?),
    }
    Ok(())
}

fn cmd_normalize(input: &Path, out: &Path, kind: DocumentKind) -> CliResult<()> {
    let config = ValidationConfig::default();
    match kind {
        DocumentKind::Input => save_input(out, &load_input(input, &config)?)?,
        DocumentKind::Output => save_output(out, &load_output(input, &config)?)?,
    }
    println!("✓ {} -> {}", input.display(), out.display());
    Ok(())
}

fn cmd_summary(input: &Path) -> CliResult<()> {
    let document = load_input(input, &ValidationConfig::default())?;

    println!("Input document: {}", input.display());
    println!(
        "  Time periods: {}",
        document.time_series_input.general.time_periods
    );
    for (collection, count) in document.counts() {
        println!("  {}: {}", collection, count);
    }
    Ok(())
}
