use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use decision_trace::analysis::DecisionAnalyst;
use decision_trace::report::{ReportOptions, ReportRenderer};
use decision_trace::{config::Config, routes::create_router, AnalysisResult, AppState};

#[derive(Parser)]
#[command(name = "decision-trace", version, about = "Audit decisions and export the trace as a PDF")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Render a saved analysis JSON file into a PDF report
    Render {
        /// Path to an analysis result in JSON form
        #[arg(short, long)]
        input: PathBuf,
        /// Directory the PDF is written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "decision_trace=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Render { input, out_dir } => render_file(&config, &input, &out_dir),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Configuration loaded: {:?}", config.server);

    let analyst = DecisionAnalyst::from_config(&config.llm)?;
    let state = AppState {
        config: config.clone(),
        analyst: Arc::new(analyst),
    };

    let app = create_router(state);

    let ip = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid HOST: {}", config.server.host))?;
    let addr = SocketAddr::new(ip, config.server.port);
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

fn render_file(config: &Config, input: &Path, out_dir: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let analysis: AnalysisResult = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid analysis result", input.display()))?;

    let renderer = ReportRenderer::with_options(ReportOptions {
        product_name: config.report.product_name.clone(),
        ..ReportOptions::default()
    });
    let report = renderer.render(&analysis)?;
    let path = report.save_to(out_dir)?;

    info!(pages = report.page_count, "Wrote {}", path.display());
    Ok(())
}
