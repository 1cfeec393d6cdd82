use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use library_catalog::catalog::controller::{load_catalog, run_menu, Console};
use library_catalog::catalog::factory;
use library_catalog::core::domain::{Configuration, DEFAULT_STORE_FILE};
use library_catalog::core::library::LibraryResult;
use library_catalog::core::repository::RepositoryStore;
use library_catalog::utils::logs::setup_tracing;

#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(about = "Manage a small library catalog from a text menu", long_about = None)]
struct Cli {
    /// JSON file the catalog is saved to and loaded from
    #[arg(short, long, default_value = DEFAULT_STORE_FILE)]
    file: PathBuf,

    /// Start with an empty catalog instead of the built-in titles
    #[arg(long)]
    empty: bool,

    /// Load the catalog file before showing the menu
    #[arg(long)]
    load: bool,

    /// Keep saved catalogs in memory only
    #[arg(long)]
    memory: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Write logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn configuration(&self) -> Configuration {
        let mut config = Configuration::new(&self.file);
        if self.memory {
            config.store = RepositoryStore::Memory;
        }
        config.seed = !self.empty;
        config.load_on_start = self.load;
        config.log_level = self.log_level.clone();
        config.json_logs = self.json_logs;
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.configuration();
    setup_tracing(&config.log_level, config.json_logs);
    tracing::debug!(config = ?config, "starting catalog");

    let mut catalog_service = factory::create_catalog_service(&config);
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());

    let res: LibraryResult<()> = async {
        if config.load_on_start {
            load_catalog(catalog_service.as_mut(), &mut console).await?;
        }
        run_menu(catalog_service.as_mut(), &mut console).await
    }.await;

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // only terminal I/O failures end up here
            tracing::error!(error = %err, "console failed");
            eprintln!("catalog: {}", err);
            ExitCode::FAILURE
        }
    }
}
