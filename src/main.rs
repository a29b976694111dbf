mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use diagserve_core::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging.
    // Respect RUST_LOG env var if set, otherwise use defaults based on the
    // verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "diagserve=trace,diagserve_server=trace,diagserve_db=debug,diagserve_core=debug,tower_http=debug"
                .to_string()
        } else {
            "diagserve=debug,diagserve_server=debug,diagserve_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let mut config = Config::load_or_default(cli.config.as_deref());

            // Override host/port from CLI if specified
            config.server.host = host;
            config.server.port = port;

            tracing::info!("Starting diagserve server");
            tracing::info!(
                "Server will listen on {}:{}",
                config.server.host,
                config.server.port
            );

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(diagserve_server::start(config))?;
            Ok(())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("diagserve {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    let Some(path) = path else {
        anyhow::bail!("No config file specified (use --config or pass a path)");
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = Config::from_json(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("{} is valid", path.display());
    } else {
        for warning in &warnings {
            println!("warning: {warning}");
        }
    }

    Ok(())
}
