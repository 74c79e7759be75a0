use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "credlens")]
#[command(
    version,
    about = "Credibility analysis of text using a local LLM agent pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze text for credibility issues
    Analyze {
        #[arg(help = "Text to analyze (reads stdin when omitted)")]
        text: Option<String>,
        #[arg(long, help = "Read text from a file")]
        file: Option<PathBuf>,
        #[arg(long, short, help = "Where the text came from (URL, app name)")]
        source: Option<String>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Check configuration, inference server, and memory
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(long, help = "Print as JSON instead of TOML")]
        json: bool,
    },
    /// Show configuration file paths
    Path,
    /// Initialize global configuration
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mCredLens encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        // Catches duplicate short flags and other argument conflicts
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_flags_parse() {
        let cli = Cli::try_parse_from(["credlens", "analyze", "-f", "json", "--file", "a.txt"])
            .unwrap();
        match cli.command {
            Commands::Analyze { file, format, .. } => {
                assert_eq!(format, "json");
                assert_eq!(file.unwrap(), PathBuf::from("a.txt"));
            }
            _ => panic!("expected analyze"),
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Analyze {
            text,
            file,
            source,
            format,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(credlens::cli::commands::analyze::run(
                credlens::cli::commands::analyze::AnalyzeOptions {
                    text,
                    file,
                    source,
                    format,
                    quiet: cli.quiet,
                },
            ))?;
        }
        Commands::Doctor => {
            let rt = Runtime::new()?;
            rt.block_on(credlens::cli::commands::doctor::run())?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => {
                credlens::cli::commands::config::show(json)?;
            }
            ConfigAction::Path => {
                credlens::cli::commands::config::path()?;
            }
            ConfigAction::Init { force } => {
                credlens::cli::commands::config::init(force)?;
            }
        },
    }

    Ok(())
}
