use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use rotate_batch_cli::config::{AppConfig, CliOverrides, ConfigManager, get_config};
use rotate_batch_cli::error::{CliError, CliResult, ExitCode};
use rotate_batch_cli::orchestrators::RotateOrchestrator;
use rotate_batch_cli::output::SummaryFormat;
use rotate_batch_cli::{prompt, terminal};
use rotate_batch_core::{ROTATIONS_PER_IMAGE, SWEEP_STEP_DEGREES};

#[derive(Parser)]
#[command(name = "rotate-batch")]
#[command(
    author,
    version,
    about = "Rotate every image in a folder through a full turn, one PNG per 2 degrees",
    long_about = None
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(flatten)]
    rotate: RotateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct RotateArgs {
    /// Folder containing the source images (asked for when omitted)
    input_dir: Option<PathBuf>,

    /// Folder receiving the rotated images, created if missing (asked for when omitted)
    output_dir: Option<PathBuf>,

    /// Number of images processed at the same time
    #[arg(short, long, value_name = "N", value_parser = parse_jobs)]
    jobs: Option<usize>,

    /// Disable progress bar display
    #[arg(long)]
    no_progress: bool,

    /// Summary format
    #[arg(short, long, value_enum)]
    format: Option<SummaryFormat>,

    /// Process images in directory listing order instead of by name
    #[arg(long)]
    unsorted: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., processing.max_concurrent_jobs)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., processing.max_concurrent_jobs)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

fn parse_jobs(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(jobs) => Ok(jobs),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;

    init_logging(debug);

    let code = match run(cli).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            log::debug!("Command failed: {e}");
            eprint!("{}", e.format_for_user(debug));
            e.exit_code()
        }
    };

    std::process::exit(code.code());
}

fn init_logging(debug: bool) {
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("rotate_batch_core", log::LevelFilter::Debug)
            .filter_module("rotate_batch_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Some(Commands::Config { command }) => config_command(command),
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
        None => {
            let config = get_config()
                .map_err(|e| CliError::general(&format!("Failed to load configuration: {e:#}")))?;
            rotate_command(config, cli.rotate).await
        }
    }
}

async fn rotate_command(mut config: AppConfig, args: RotateArgs) -> CliResult<()> {
    config.apply_cli_overrides(&CliOverrides {
        jobs: args.jobs,
        unsorted: args.unsorted,
        no_progress: args.no_progress,
        format: args.format,
    });

    if !config.output.color_enabled {
        colored::control::set_override(false);
    }

    let input_dir = match args.input_dir {
        Some(path) => path,
        None if terminal::can_prompt() => prompt::prompt_input_dir()?,
        None => {
            return Err(CliError::misuse(
                "Missing INPUT_DIR: pass the folder with the source images",
            ));
        }
    };

    let output_dir = match args.output_dir {
        Some(path) => path,
        None if terminal::can_prompt() => prompt::prompt_output_dir()?,
        None => {
            return Err(CliError::misuse(
                "Missing OUTPUT_DIR: pass the folder for the rotated images",
            ));
        }
    };

    let text_output = config.output.default_format == SummaryFormat::Text;
    let orchestrator = RotateOrchestrator::new(config)
        .with_progress(terminal::should_show_progress_by_default());

    if text_output {
        eprintln!("{}", "rotate-batch".bold().cyan());
        eprintln!(
            "Writing {} rotations per image ({}° steps)",
            ROTATIONS_PER_IMAGE, SWEEP_STEP_DEGREES
        );
        eprintln!("  Input:  {}", input_dir.display());
        eprintln!("  Output: {}", output_dir.display());
        eprintln!();
    }

    let result = orchestrator.run(&input_dir, &output_dir).await?;
    let summary = orchestrator.render_summary(&result)?;

    let mut stdout = std::io::stdout();
    if text_output && orchestrator.shows_progress() {
        writeln!(stdout).map_err(|e| CliError::from_io_error(e, "stdout"))?;
    }
    writeln!(stdout, "{}", summary.trim_end()).map_err(|e| CliError::from_io_error(e, "stdout"))?;

    Ok(())
}

fn config_command(command: ConfigCommand) -> CliResult<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            let value = manager.get(&key)?;
            println!("{value}");
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;

            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());
            eprintln!();

            // Group items by section
            let mut sections: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
            for (key, value) in items {
                let (section, name) = key.split_once('.').unwrap_or(("general", key.as_str()));
                sections
                    .entry(section.to_string())
                    .or_default()
                    .push((name.to_string(), value));
            }

            for (section, items) in sections {
                println!("[{}]", section.yellow());
                for (key, value) in items {
                    println!("  {} = {}", key.cyan(), value);
                }
                println!();
            }
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
