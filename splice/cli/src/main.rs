//! CLI for replacing a marker-bounded block of text in a file.
//!
//! ## Usage
//!
//! ```bash
//! # Swap one chart component for another
//! splice src/pages/DashboardPage.js \
//!   --start "<SalesTrendChart" --end "</SalesTrendChart>" \
//!   --with "<ProfitabilityTrendChart data={trend} />"
//!
//! # Replacement from a file, or from stdin
//! splice page.js -s "<A>" -e "</A>" --with-file snippet.jsx
//! cat snippet.jsx | splice page.js -s "<A>" -e "</A>" --with -
//!
//! # Describe the splice in a TOML recipe
//! splice --recipe swap-chart.toml
//!
//! # Generate shell completions
//! source <(COMPLETE=bash splice)
//! ```

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueHint};
use clap_complete::Shell;
use splice_lib::{
    Markers, Recipe, SpliceError, SpliceOptions, SpliceReport, read_text, replace_in_file,
};
use thiserror::Error;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Replace the first marker-bounded block in a file
#[derive(Debug, Parser)]
#[command(name = "splice", version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// File to edit in place (required unless --recipe)
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    file: Option<PathBuf>,

    /// Start marker (literal text)
    #[arg(short, long, value_name = "MARKER")]
    start: Option<String>,

    /// End marker (literal text); the block extends to the next `>` after it
    #[arg(short, long, value_name = "MARKER")]
    end: Option<String>,

    /// Replacement text ("-" reads it from stdin)
    #[arg(
        short,
        long = "with",
        value_name = "TEXT",
        allow_hyphen_values = true,
        conflicts_with = "with_file"
    )]
    with: Option<String>,

    /// Read the replacement text from a file
    #[arg(short = 'f', long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    with_file: Option<PathBuf>,

    /// Load file, markers and replacement from a TOML recipe
    #[arg(
        short,
        long,
        value_name = "TOML",
        value_hint = ValueHint::FilePath,
        conflicts_with_all = ["file", "start", "end", "with", "with_file"]
    )]
    recipe: Option<PathBuf>,

    /// Locate the block and report it without writing
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    log_verbosity: u8,
}

const AFTER_HELP: &str = "\
SHELL COMPLETIONS:
  Bash (~/.bashrc):
    source <(COMPLETE=bash splice)

  Zsh (~/.zshrc):
    source <(COMPLETE=zsh splice)

  Fish (~/.config/fish/config.fish):
    COMPLETE=fish splice | source

EXAMPLES:
  splice page.js -s \"<A>\" -e \"</A>\" --with \"<B/>\"      # replace block
  splice page.js -s \"<A>\" -e \"</A>\" -f chart.jsx -n     # dry run
  splice --recipe swap-chart.toml                       # from recipe
";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Splice(#[from] SpliceError),

    #[error(transparent)]
    Args(#[from] clap::Error),

    #[error("failed to read replacement from stdin: {0}")]
    Stdin(io::Error),

    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}

/// A splice request assembled from flags or a recipe.
struct Request {
    path: PathBuf,
    markers: Markers,
    replacement: String,
}

fn main() -> ExitCode {
    if let Ok(shell_name) = std::env::var("COMPLETE") {
        return generate_completions(&shell_name);
    }

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Args(e)) => e.exit(),
        Err(e) => {
            tracing::debug!(error = ?e, "splice failed");
            eprintln!("Error: {e}");
            if let CliError::Splice(ref err) = e {
                if err.is_marker_error() {
                    eprintln!("No changes written.");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let request = build_request(cli)?;
    let options = SpliceOptions {
        dry_run: cli.dry_run,
    };

    let report = replace_in_file(&request.path, &request.markers, &request.replacement, options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", status_line(&report));
    }
    Ok(())
}

/// Builds the request from `--recipe` or from the individual flags.
fn build_request(cli: &Cli) -> Result<Request, CliError> {
    if let Some(ref recipe_path) = cli.recipe {
        let recipe = Recipe::load(recipe_path)?;
        return Ok(Request {
            path: recipe.path,
            markers: recipe.markers,
            replacement: recipe.replacement,
        });
    }

    let (Some(path), Some(start), Some(end)) = (&cli.file, &cli.start, &cli.end) else {
        return Err(missing_args("FILE, --start and --end are required unless --recipe is given"));
    };

    let replacement = match (cli.with.as_deref(), cli.with_file.as_ref()) {
        (Some("-"), _) => read_stdin()?,
        (Some(text), _) => text.to_string(),
        (None, Some(file)) => read_text(file)?,
        (None, None) => return Err(missing_args("--with or --with-file is required")),
    };

    Ok(Request {
        path: path.clone(),
        markers: Markers::new(start.clone(), end.clone()),
        replacement,
    })
}

/// A clap usage error, so it prints and exits like the parser's own.
fn missing_args(message: &str) -> CliError {
    CliError::Args(
        Cli::command().error(ErrorKind::MissingRequiredArgument, message),
    )
}

fn read_stdin() -> Result<String, CliError> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .map_err(CliError::Stdin)?;
    Ok(content)
}

fn status_line(report: &SpliceReport) -> String {
    let verb = if report.written { "Replaced" } else { "Would replace" };
    format!(
        "{verb} bytes {}..{} in {} ({} removed, {} inserted)",
        report.span.start,
        report.span.end,
        report.path.display(),
        report.removed_bytes,
        report.inserted_bytes
    )
}

/// Initialize tracing on stderr from `RUST_LOG` or the `-v` count.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,splice_lib=info".to_string(),
            2 => "info,splice_lib=debug".to_string(),
            _ => "debug,splice_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

/// Generate shell completions for `shell_name`.
fn generate_completions(shell_name: &str) -> ExitCode {
    let shell = match shell_name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => {
            eprintln!(
                "Unknown shell: {shell_name}. Supported: bash, zsh, fish, powershell, elvish"
            );
            return ExitCode::FAILURE;
        }
    };

    clap_complete::generate(shell, &mut Cli::command(), "splice", &mut io::stdout());
    ExitCode::SUCCESS
}
