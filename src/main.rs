use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use portfolio::{
    Config,
    cloudinary::{CloudinaryClient, CloudinaryConfig},
    commands::{self, CommandError, UploadOptions, upload::DEFAULT_PATTERN},
    create_app, startup_checks,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Global options that apply to all commands
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the generated preview (default if no command specified)
    Serve {
        #[arg(short, long)]
        port: Option<u16>,

        #[arg(long)]
        host: Option<String>,

        /// Automatically quit after specified number of seconds (useful for testing)
        #[arg(long)]
        quit_after: Option<u64>,
    },

    /// Fetch the image list from Cloudinary into the data file
    Sync,

    /// Upload local images to Cloudinary
    Upload {
        /// List matching files without uploading
        #[arg(long)]
        dry_run: bool,

        /// Files to upload
        #[arg(long, default_value = DEFAULT_PATTERN)]
        pattern: String,
    },

    /// Regenerate the static preview pages from the data file
    Preview,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&cli.config)?;

    let outcome = match cli.command {
        Some(Commands::Serve {
            port,
            host,
            quit_after,
        }) => return run_server(config, port, host, quit_after).await,
        None => return run_server(config, None, None, None).await,
        Some(Commands::Sync) => run_sync(&config).await,
        Some(Commands::Upload { dry_run, pattern }) => {
            run_upload(UploadOptions { pattern, dry_run }).await
        }
        Some(Commands::Preview) => run_preview(&config).await,
    };

    if let Err(e) = outcome {
        let code = e.exit_code();
        if code == 0 {
            error!("{}. Nothing to do.", e);
        } else {
            error!("{}", e);
        }
        std::process::exit(code);
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config = toml_edit::de::from_str::<Config>(&content)?;
        info!("Configuration loaded from: {:?}", path);
        Ok(config)
    } else {
        info!("Config file not found at {:?}, using defaults", path);
        Ok(Config::default())
    }
}

async fn run_sync(config: &Config) -> Result<(), CommandError> {
    let cloudinary = CloudinaryConfig::from_env()?;
    let client = CloudinaryClient::new(cloudinary.clone())?;

    let report = commands::run_sync(&client, &cloudinary, &config.data.data_file).await?;
    info!(
        "Done: {} resources fetched, {} written to {:?}",
        report.fetched, report.written, report.data_file
    );
    Ok(())
}

async fn run_upload(options: UploadOptions) -> Result<(), CommandError> {
    let cloudinary = CloudinaryConfig::from_env()?;
    let folder = cloudinary.folder().to_string();
    let client = CloudinaryClient::new(cloudinary)?;

    let root = std::env::current_dir()?;
    let report = commands::run_upload(&client, &folder, &root, &options).await?;
    if report.failed > 0 {
        warn!("{} of {} uploads failed", report.failed, report.found);
    }
    Ok(())
}

async fn run_preview(config: &Config) -> Result<(), CommandError> {
    if let Err(errors) = startup_checks::check_preview(config).await {
        for e in &errors {
            warn!("Startup check failed: {}", e);
        }
    }

    let report = commands::run_preview(config).await?;
    if !report.skipped.is_empty() {
        warn!("Skipped pages without templates: {}", report.skipped.join(", "));
    }
    Ok(())
}

async fn run_server(
    config: Config,
    port: Option<u16>,
    host: Option<String>,
    quit_after: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let host = host.unwrap_or(config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info!("Starting {} preview server", config.site.name);
    info!(
        "Serving preview directory: {:?}",
        config.preview.output_directory
    );

    if let Err(errors) = startup_checks::check_serve(&config).await {
        for e in &errors {
            warn!("Startup check failed: {}", e);
        }
        if errors.iter().any(|e| e.is_critical()) {
            error!("Critical startup check failed, exiting");
            return Err("Critical startup check failed".into());
        }
    }

    let app = create_app(config).await;

    let addr = SocketAddr::from((host.parse::<std::net::IpAddr>()?, port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app);
    let graceful = server.with_graceful_shutdown(shutdown_signal(quit_after));

    if let Err(e) = graceful.await {
        error!("Server error: {}", e);
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(quit_after: Option<u64>) {
    use tokio::signal;
    use tokio::time::{Duration, sleep};

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let quit_timer = async {
        if let Some(seconds) = quit_after {
            info!(
                "Server will automatically shut down after {} seconds",
                seconds
            );
            sleep(Duration::from_secs(seconds)).await;
            info!("Quit timer expired, shutting down");
        } else {
            std::future::pending::<()>().await
        }
    };

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        },
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        },
        _ = quit_timer => {},
    }
}
