use clap::Parser;
use freshcard::cli::{Cli, Commands};
use freshcard::types::config::Config;
use freshcard::FreshcardResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> FreshcardResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        match Config::load(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Aviso: configuração inválida em {} ({}), usando padrão.",
                    cli.config.display(),
                    e
                );
                Config::default_config()
            }
        }
    } else {
        Config::default_config()
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("freshcard={}", log_level)
            .parse()
            .unwrap_or_else(|_| "freshcard=info".parse().expect("fallback directive is valid")),
    );

    if config.general.log_format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            freshcard::cli::commands::init(path).await?;
        }
        Commands::Replay {
            file,
            base,
            final_only,
        } => {
            freshcard::cli::commands::replay(&file, base.as_deref(), final_only, &config).await?;
        }
        Commands::Watch {
            source,
            ticks,
            interval_ms,
        } => {
            freshcard::cli::commands::watch(source, ticks, interval_ms, &config).await?;
        }
        Commands::Show => {
            freshcard::cli::commands::show(&config).await?;
        }
        Commands::Config => {
            freshcard::cli::commands::config_cmd(&cli.config).await?;
        }
        Commands::Version => {
            freshcard::cli::commands::version();
        }
    }

    Ok(())
}
