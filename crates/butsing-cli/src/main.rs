//! Butsing CLI - inspect routes, listeners and configuration.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`BUTSING_*`)
//! 3. Config file (`--config`, or `.butsing/config.toml` in the project root)
//! 4. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `BUTSING_DEBUG`: Enable debug mode (`true`/`false`)
//! - `BUTSING_APP_NAME`: Site name
//! - `BUTSING_COMPOSERY_HOME`: Package manager working directory
//! - `BUTSING_LOG_LEVEL`: Default log filter when `RUST_LOG` is unset
//! - `BUTSING_PLUGINS`: Comma-separated plugin list (replaces the configured one)

use anyhow::{Context, Result};
use butsing_app::config::{AppConfig, ConfigError, ConfigLoader};
use butsing_app::login::LoginOutcome;
use butsing_app::plugins::BUILTIN_PLUGINS;
use butsing_app::{ButsingApp, CliOverrides, EventCategory};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Butsing CLI - inspect routes, listeners and configuration
#[derive(Parser, Debug)]
#[command(name = "butsing")]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file (replaces <project>/.butsing/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    project: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log filter (overrides `logging.level` and `RUST_LOG`)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Site name (overrides `app.name`)
    #[arg(long, value_name = "NAME")]
    app_name: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bootstrap the app and print the final route table
    Routes {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Bootstrap the app and print registered listeners per category
    Listeners,
    /// Validate configuration and plugin selection
    Check,
    /// Dispatch a login attempt event
    Login {
        /// User name carried by the event
        username: String,
        /// Report the attempt as rejected
        #[arg(long)]
        rejected: bool,
    },
}

/// File/env configuration source selected by CLI arguments.
struct CliConfigResolver {
    project_root: PathBuf,
    config_file: Option<PathBuf>,
    debug: bool,
    log_level: Option<String>,
    app_name: Option<String>,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to get current directory, using '.'");
                PathBuf::from(".")
            })
        });

        Self {
            project_root,
            config_file: args.config.clone(),
            debug: args.debug,
            log_level: args.log_level.clone(),
            app_name: args.app_name.clone(),
        }
    }

    fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut loader = ConfigLoader::new().with_project_root(&self.project_root);
        if let Some(ref file) = self.config_file {
            loader = loader.with_file(file);
        }
        loader.load()
    }

    /// CLI flags as the highest-priority layer. `false` or absent flags
    /// leave the loaded values alone.
    fn overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .debug_opt(self.debug.then_some(true))
            .log_level_opt(self.log_level.clone())
            .app_name_opt(self.app_name.clone())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let resolver = CliConfigResolver::from_args(&args);

    let config = resolver.load().context("Config error")?;

    // Filter: --debug > --verbose > --log-level > RUST_LOG env > config logging.level
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else if let Some(ref level) = args.log_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!(path = %resolver.project_root.display(), "Project root");

    let app = ButsingApp::builder(config)
        .with_overrides(resolver.overrides())
        .build()?;

    debug!(
        debug = app.config().debug,
        plugins = ?app.plugin_names().collect::<Vec<_>>(),
        "Application initialized"
    );

    match args.command {
        Command::Routes { json } => {
            let routes = app.bootstrap()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&routes)?);
            } else {
                for route in &routes {
                    println!("{route}");
                }
            }
        }
        Command::Listeners => {
            app.bootstrap()?;
            print_listeners(&app);
        }
        Command::Check => print_check(&app),
        Command::Login { username, rejected } => {
            app.bootstrap()?;
            let outcome = if rejected {
                LoginOutcome::Rejected
            } else {
                LoginOutcome::Succeeded
            };
            let event = app.notify_login(&username, outcome)?;
            println!("login {} for {}", event.outcome, event.username);
        }
    }

    Ok(())
}

fn print_listeners(app: &ButsingApp) {
    let registry = app.registry().read();
    let mut categories: Vec<&EventCategory> = registry.registered_categories().collect();
    categories.sort_by_key(|c| c.name());

    if categories.is_empty() {
        println!("no listeners registered");
        return;
    }

    for category in categories {
        println!("{category}");
        for (listener, priority) in registry.entries(category) {
            println!("  {priority:>5}  {}", listener.key());
        }
    }
}

fn print_check(app: &ButsingApp) {
    let config = app.config();
    println!("app:       {}", config.app.name);
    println!("debug:     {}", config.debug);
    println!("log level: {}", config.logging.level);
    println!("composery: {}", config.composery.home.display());
    println!("database:  {}", config.database.dsn());

    let plugins: Vec<&str> = app.plugin_names().collect();
    if plugins.is_empty() {
        println!("plugins:   (none; available: {})", BUILTIN_PLUGINS.join(", "));
    } else {
        println!("plugins:   {}", plugins.join(", "));
    }
    println!("configuration ok");
}
