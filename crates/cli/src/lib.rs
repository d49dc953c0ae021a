pub mod commands;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use stackcoach_core::config::{AppConfig, LoadOptions, LogFormat, LoggingConfig};

#[derive(Debug, Parser)]
#[command(
    name = "stackcoach",
    about = "Stackcoach supplement recommendation CLI",
    long_about = "Score a quiz profile, build supplement stacks and priority picks, resolve product names, and inspect configuration.",
    after_help = "Examples:\n  stackcoach score --answers quiz.json\n  stackcoach stack --answers quiz.json --advisor\n  stackcoach resolve preworkout \"fish oil\"\n  stackcoach catalog --goal sleep"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a stackcoach.toml config file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Compute the optimization score breakdown for a quiz answer file")]
    Score {
        #[arg(long, help = "Quiz answers JSON file")]
        answers: PathBuf,
    },
    #[command(about = "Build the recommended supplement stack, optionally via the AI advisor")]
    Stack {
        #[arg(long, help = "Quiz answers JSON file")]
        answers: PathBuf,
        #[arg(long, help = "Ask the external advisor first and fall back to the rule engine")]
        advisor: bool,
        #[arg(long, help = "Prior result JSON forwarded to the advisor")]
        prior: Option<PathBuf>,
    },
    #[command(about = "Select up to two priority products for a quiz answer file")]
    Picks {
        #[arg(long, help = "Quiz answers JSON file")]
        answers: PathBuf,
    },
    #[command(about = "Resolve free-text product names to canonical catalog names")]
    Resolve {
        #[arg(required = true, help = "Product names to resolve")]
        names: Vec<String>,
    },
    #[command(about = "List active catalog products, optionally filtered")]
    Catalog {
        #[arg(long, help = "Category label or slug, e.g. `recovery-sleep`")]
        category: Option<String>,
        #[arg(long, help = "Goal identifier, e.g. `build-muscle`")]
        goal: Option<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.config.as_deref());

    let config_path = cli.config.as_deref();
    let result = match &cli.command {
        Command::Score { answers } => commands::score::run(answers),
        Command::Stack { answers, advisor, prior } => {
            commands::stack::run(commands::stack::StackArgs {
                answers_path: answers,
                prior_path: prior.as_deref(),
                advisor: *advisor,
                config_path,
            })
        }
        Command::Picks { answers } => commands::picks::run(answers, config_path),
        Command::Resolve { names } => commands::resolve::run(names, config_path),
        Command::Catalog { category, goal } => {
            commands::catalog::run(category.as_deref(), goal.as_deref(), config_path)
        }
        Command::Config => commands::config::run(config_path),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout carries only the JSON payload. A config that
/// fails to load falls back to default logging; the command reports the error.
fn init_logging(config_path: Option<&Path>) {
    use tracing::Level;

    let options = LoadOptions {
        config_path: config_path.map(Path::to_path_buf),
        require_file: config_path.is_some(),
        ..LoadOptions::default()
    };
    let logging: LoggingConfig = AppConfig::load(options)
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);

    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}
