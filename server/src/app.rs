//! Core application

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::{AppConfig, is_all_interfaces};
use crate::core::constants::{APP_NAME, APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::InventoryService;
use crate::domain::analytics;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub inventory: InventoryService,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(&cli_config).await?;

        match command {
            Some(Commands::Summary { user, pretty }) => app.print_summary(user, pretty).await,
            Some(Commands::Start) | None => Self::start_server(app).await,
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        if config.debug {
            tracing::debug!(config = ?config, "Resolved configuration");
        }

        let data_file = &config.inventory.data_file;
        let inventory = InventoryService::init(data_file).await.with_context(|| {
            format!("Failed to load inventory snapshot: {}", data_file.display())
        })?;

        Ok(Self {
            shutdown: ShutdownService::new(),
            config,
            inventory,
        })
    }

    async fn print_summary(&self, user_id: i64, pretty: bool) -> Result<()> {
        let inv = self.inventory.user_inventory(user_id).await?;
        let summary = analytics::build_summary(&inv.items, &inv.categories, &inv.locations)?;

        let json = if pretty {
            serde_json::to_string_pretty(&summary)?
        } else {
            serde_json::to_string(&summary)?
        };
        println!("{}", json);
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        // Logs go to stderr so `summary` output on stdout stays valid JSON
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers before binding
        app.shutdown.install_signal_handlers();

        let host = &app.config.server.host;
        let display_host = if is_all_interfaces(host) {
            "localhost"
        } else {
            host.as_str()
        };
        tracing::info!(
            "{} v{} listening on http://{}:{} (docs at /api/docs)",
            APP_NAME,
            env!("CARGO_PKG_VERSION"),
            display_host,
            app.config.server.port
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        tracing::info!(
            triggered = app.shutdown.is_triggered(),
            "Server stopped"
        );

        Ok(())
    }
}
