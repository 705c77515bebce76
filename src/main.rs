use clap::{Parser, Subcommand};
use configuration::{load_settings, Overrides, Settings};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The main entry point for the race log service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Settings overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "racelog=info,web_server=debug,database=info,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let settings = resolve_settings(args.config.as_deref(), &args.overrides)?;
            web_server::run_server(&settings).await
        }
        Commands::InitDb(args) => {
            let overrides = Overrides {
                database: args.database,
                ..Overrides::default()
            };
            let settings = resolve_settings(args.config.as_deref(), &overrides)?;
            database::open_store(&settings.database_path()?).await?;
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Records race results and lists them back over HTTP.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the store and serve the HTTP API.
    Serve(ServeArgs),
    /// Create the store and its table if absent, then exit.
    InitDb(InitDbArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Configuration file (TOML). Defaults to an optional `config.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Parser)]
struct InitDbArgs {
    /// Configuration file (TOML). Defaults to an optional `config.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the SQLite store file.
    #[arg(long)]
    database: Option<PathBuf>,
}

fn resolve_settings(
    config_file: Option<&std::path::Path>,
    overrides: &Overrides,
) -> anyhow::Result<Settings> {
    let mut settings = load_settings(config_file)?;
    settings.apply_overrides(overrides);
    settings.validate()?;
    tracing::info!(
        host = %settings.server.host,
        port = settings.server.port,
        database = ?settings.database.path,
        "Configuration loaded"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_flags_become_overrides() {
        let cli = Cli::parse_from([
            "racelog", "serve", "--port", "8080", "--database", "/tmp/races.db",
        ]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.config, None);
        assert_eq!(args.overrides.host, None);
        assert_eq!(args.overrides.port, Some(8080));
        assert_eq!(args.overrides.database, Some(PathBuf::from("/tmp/races.db")));
    }

    #[test]
    fn test_init_db_parses() {
        let cli = Cli::parse_from(["racelog", "init-db", "--database", "data/races.db"]);
        let Commands::InitDb(args) = cli.command else {
            panic!("expected init-db");
        };
        assert_eq!(args.database, Some(PathBuf::from("data/races.db")));
    }
}
