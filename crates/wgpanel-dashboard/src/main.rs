use std::path::Path;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use wgpanel_dashboard::config;
use wgpanel_dashboard::controller::Dashboard;
use wgpanel_dashboard::term::TermView;

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().pretty().with_env_filter(filter).init();
}

#[derive(Debug, Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal dashboard for a wgpanel WireGuard backend")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "/etc/wgpanel/dashboard.toml")]
    config: String,

    /// API host override, e.g. http://127.0.0.1:8080
    #[arg(long)]
    api_host: Option<String>,

    /// Keep refreshing clients and stats every N seconds instead of exiting
    #[arg(short, long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let mut cfg = config::load(Path::new(&args.config)).await?;
    if let Some(host) = args.api_host {
        cfg.api_host = host;
    }

    info!(api_host = %cfg.api_host, "starting wgpanel dashboard");

    let http = reqwest::Client::new();
    let mut dashboard = Dashboard::new(http, cfg.api_host, TermView);
    dashboard.initialize().await;

    if let Some(secs) = args.interval {
        let interval = Duration::from_secs(secs);
        loop {
            tokio::time::sleep(interval).await;
            dashboard.refresh().await;
        }
    }

    Ok(())
}
