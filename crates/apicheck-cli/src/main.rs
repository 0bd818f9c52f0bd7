//! apicheck CLI - Declarative HTTP API testing

mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use apicheck_core::config::DEFAULT_CONFIG_FILE;
use apicheck_core::{Config, ParseError, RunReport, create_skeleton_file};
use apicheck_runner::{Suite, SuiteError};

use output::Reporter;

#[derive(Parser)]
#[command(name = "apicheck")]
#[command(about = "Declarative HTTP API testing from JSON test definitions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "terminal")]
    output: OutputFormat,

    /// Verbose output: list passing tests and log debug messages
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every test suite below a directory
    Run {
        /// Directory searched for *.ac.json files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Config file (default: .ac.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Parse and validate test files without sending requests
    Verify {
        /// Test files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Config file (default: .ac.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Create a skeleton test file
    #[command(alias = "gen")]
    Generate {
        /// File name; `.ac.json` is appended if missing
        name: String,
    },

    /// Export JSON Schema for test files
    Schema,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Terminal,
    Json,
    Silent,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(3)
        }
    }
}

/// `RUST_LOG` wins; otherwise `debug` with `--verbose`, else `warn`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn config_path(config: Option<PathBuf>) -> PathBuf {
    config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

fn run(cli: Cli) -> Result<i32> {
    let reporter = Reporter::new(cli.verbose);

    match cli.command {
        Commands::Run { dir, config } => {
            let config = config_path(config);
            let suite = Suite::new(dir).with_config(&config);
            tracing::debug!(dir = %suite.dir().display(), config = %config.display(), "starting suite");
            match suite.run() {
                Ok(outcome) => {
                    print_reports(cli.output, reporter, &outcome.reports)?;
                    Ok(outcome.verdict().exit_code)
                }
                Err(SuiteError::Cleanup(e, outcome)) => {
                    print_reports(cli.output, reporter, &outcome.reports)?;
                    eprintln!("Error: unable to run cleanup script: {e}");
                    Ok(3)
                }
                Err(e) => Err(e.into()),
            }
        }

        Commands::Verify { files, config } => {
            let cfg = Config::load_or_default(&config_path(config))?;
            verify_files(&cfg, &files, cli.output)
        }

        Commands::Generate { name } => match create_skeleton_file(&name) {
            Ok(path) => {
                match cli.output {
                    OutputFormat::Terminal => {
                        println!("successfully created template file {}", path.display());
                    }
                    OutputFormat::Json => {
                        println!("{}", serde_json::json!({ "created": path }));
                    }
                    OutputFormat::Silent => {}
                }
                Ok(0)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                Ok(1)
            }
        },

        Commands::Schema => {
            let schema = apicheck_core::schema::generate_schema()?;
            println!("{schema}");
            Ok(0)
        }
    }
}

fn print_reports(format: OutputFormat, reporter: Reporter, reports: &[RunReport]) -> Result<()> {
    match format {
        OutputFormat::Terminal => println!("{}", reporter.to_terminal(reports)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reporter.to_json(reports))?);
        }
        OutputFormat::Silent => {}
    }
    Ok(())
}

/// Exit 0 when every file is valid, 1 on the first invalid one.
fn verify_files(config: &Config, files: &[PathBuf], format: OutputFormat) -> Result<i32> {
    let parser = apicheck_core::Parser::new(config);
    let tests = match parser.parse(files) {
        Ok(tests) => tests,
        Err(e @ ParseError::Io { .. }) => return Err(e.into()),
        Err(e) => {
            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::json!({ "valid": false, "error": e.to_string() })
                    );
                }
                _ => eprintln!("Error: {e}"),
            }
            return Ok(1);
        }
    };

    let warnings = apicheck_core::Parser::lint(&tests);
    match format {
        OutputFormat::Terminal => {
            for w in &warnings {
                eprintln!("Warning: {w}");
            }
            println!(
                "validated successfully: {} tests in {} files",
                tests.len(),
                files.len()
            );
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "valid": true,
                    "tests": tests.len(),
                    "files": files.iter().map(|f| f.display().to_string()).collect::<Vec<_>>(),
                    "warnings": warnings,
                }))?
            );
        }
        OutputFormat::Silent => {}
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_defaults() {
        let cli = Cli::try_parse_from(["apicheck", "run"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Terminal);
        assert!(!cli.verbose);
        let Commands::Run { dir, config } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(dir, PathBuf::from("."));
        assert!(config.is_none());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["apicheck", "run", "--output", "json", "-v"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn gen_is_alias_for_generate() {
        let cli = Cli::try_parse_from(["apicheck", "gen", "users"]).unwrap();
        assert!(matches!(cli.command, Commands::Generate { ref name } if name == "users"));
    }

    #[test]
    fn verify_requires_files() {
        assert!(Cli::try_parse_from(["apicheck", "verify"]).is_err());
        let cli = Cli::try_parse_from(["apicheck", "verify", "a.ac.json", "b.ac.json"]).unwrap();
        let Commands::Verify { files, .. } = cli.command else {
            panic!("expected verify");
        };
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn verify_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.ac.json");
        let bad = dir.path().join("bad.ac.json");
        std::fs::write(&good, r#"[{"hostname": "http://localhost", "endpoint": "/"}]"#).unwrap();
        std::fs::write(&bad, r#"[{"hostname": "http://localhost", "endpoint": "apps"}]"#).unwrap();

        let config = Config::default();
        assert_eq!(verify_files(&config, &[good], OutputFormat::Silent).unwrap(), 0);
        assert_eq!(verify_files(&config, &[bad], OutputFormat::Silent).unwrap(), 1);
        let absent = dir.path().join("absent.ac.json");
        assert!(verify_files(&config, &[absent], OutputFormat::Silent).is_err());
    }
}
