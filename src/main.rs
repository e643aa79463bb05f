//! traffic-config command line.
//!
//! Resolves the layered configuration for the current environment and prints,
//! validates, snapshots or watches it.
//!
//! ```text
//! traffic-config [--env NAME] [--config-dir DIR] [-v] <COMMAND>
//!
//!   show [--flat]   print the resolved tree (JSON, or one path=value per line)
//!   get PATH        print a single value
//!   validate        resolve and report problems; non-zero exit on failure
//!   template        print an example environment file
//!   save [PATH]     write a snapshot of the resolved tree
//!   watch           keep resolving as the environment file changes
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use traffic_config::config::env::ProcessEnvironment;
use traffic_config::config::schema::{
    LoadBalancingSettings, MonitoringSettings, RateLimitingSettings,
};
use traffic_config::config::template;
use traffic_config::config::watcher::ConfigWatcher;
use traffic_config::observability::{logging, metrics};
use traffic_config::{ConfigResolver, ResolverOptions, SharedConfig};

#[derive(Parser)]
#[command(name = "traffic-config")]
#[command(about = "Resolve and inspect layered traffic configuration", long_about = None)]
struct Cli {
    /// Deployment environment (defaults to $APP_ENV, then "development").
    #[arg(short, long)]
    env: Option<String>,

    /// Directory holding <environment>.toml files (defaults to $TRAFFIC_CONFIG_DIR).
    #[arg(short = 'd', long)]
    config_dir: Option<PathBuf>,

    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an example environment file
    Template,
    #[command(flatten)]
    Resolved(ResolvedCommand),
}

/// Commands that operate on the resolved configuration.
#[derive(Subcommand)]
enum ResolvedCommand {
    /// Print the resolved configuration
    Show {
        /// One `path = value` line per leaf instead of JSON
        #[arg(long)]
        flat: bool,
    },
    /// Print the value at a dotted path
    Get { path: String },
    /// Resolve and report validation problems
    Validate,
    /// Write a snapshot of the resolved configuration
    Save { path: Option<PathBuf> },
    /// Re-resolve whenever the environment file changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let command = match cli.command {
        Commands::Template => {
            print!("{}", template::render());
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Resolved(command) => command,
    };

    let Some(resolver) = resolve(cli.env, cli.config_dir) else {
        return Ok(ExitCode::FAILURE);
    };

    match command {
        ResolvedCommand::Show { flat } => {
            if flat {
                for (path, value) in resolver.tree().flatten() {
                    println!("{} = {}", path, value);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(resolver.tree())?);
            }
        }
        ResolvedCommand::Get { path } => match resolver.get(&path) {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("No configuration value at {}", path);
                return Ok(ExitCode::FAILURE);
            }
        },
        ResolvedCommand::Validate => {
            for warning in resolver.warnings() {
                eprintln!("warning: {}", warning);
            }
            println!("Configuration for {} is valid", resolver.environment());
        }
        ResolvedCommand::Save { path } => {
            let written = resolver.save_config(path.as_deref())?;
            println!("{}", written.display());
        }
        ResolvedCommand::Watch => watch(resolver).await?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Resolve for the selected environment, reporting failures on stderr.
fn resolve(env: Option<String>, config_dir: Option<PathBuf>) -> Option<ConfigResolver> {
    let mut options = ResolverOptions::from_env(&ProcessEnvironment);
    if let Some(env) = env {
        options.environment = env;
    }
    if let Some(dir) = config_dir {
        options.config_dir = dir;
    }

    match ConfigResolver::new(options, ProcessEnvironment) {
        Ok(resolver) => Some(resolver),
        Err(e) => {
            for problem in e.validation_errors() {
                eprintln!("  - {}", problem);
            }
            eprintln!("Error: {}", e);
            None
        }
    }
}

async fn watch(mut resolver: ConfigResolver) -> Result<(), Box<dyn std::error::Error>> {
    let handle = SharedConfig::new(resolver.tree().clone());
    log_summary(&handle);

    let (watcher, mut reloads) = ConfigWatcher::new(&resolver.options().environment_file());
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(request) = reloads.recv() => {
                match resolver.reset() {
                    Ok(()) => {
                        handle.publish(resolver.tree().clone());
                        metrics::record_reload("applied");
                        tracing::info!(path = %request.path.display(), "Configuration reloaded");
                        log_summary(&handle);
                    }
                    Err(e) => {
                        metrics::record_reload("rejected");
                        tracing::error!("Reload failed: {}. Keeping current configuration.", e);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupt received, stopping watcher");
                break;
            }
        }
    }

    Ok(())
}

fn log_summary(handle: &SharedConfig) {
    let tree = handle.load();

    match (
        tree.section::<RateLimitingSettings>("rateLimiting"),
        tree.section::<LoadBalancingSettings>("loadBalancing"),
        tree.section::<MonitoringSettings>("monitoring"),
    ) {
        (Ok(rate), Ok(lb), Ok(mon)) => tracing::info!(
            window_ms = rate.window_ms,
            max_requests = rate.max_requests,
            strategy = %lb.strategy,
            servers = lb.servers.len(),
            log_level = %mon.log_level,
            metrics_enabled = mon.metrics_enabled,
            "Configuration active"
        ),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            tracing::warn!("Could not summarize configuration: {}", e)
        }
    }
}
