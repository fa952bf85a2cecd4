use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use ytandel::api;
use ytandel::assets::AssetLoader;
use ytandel::models::{AppConfig, ProfileMode};
use ytandel::server;
use ytandel::services::{
    AnalysisPipeline, CalibrationRepository, CalibrationService, InMemoryRepository,
    JsonFileRepository,
};

#[derive(Parser)]
#[command(name = "ytandel")]
#[command(about = "Areaanalys - land-cover share analysis of forest map captures")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Analyze an image file and write the report PNG next to it
    Analyze {
        /// Image to analyze (PNG, JPEG or WebP)
        input: PathBuf,

        /// Output path for the report (default: Areaanalys_<name>.png next
        /// to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Matching tolerance for the nearest-reference ruleset
        #[arg(short, long)]
        tolerance: Option<f32>,

        /// Profile: "auto", "high" or "low"
        #[arg(short, long)]
        profile: Option<ProfileMode>,

        /// Calibration file to use instead of the configured one
        #[arg(short, long)]
        calibration: Option<PathBuf>,
    },
    /// Extract the embedded config.yaml to the filesystem for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ytandel API",
        description = "Areaanalys - land-cover share analysis of forest map captures",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_analyze,
        api::handle_report,
        api::handle_get_calibration,
        api::handle_put_calibration,
        api::handle_delete_calibration,
        api::handle_pick,
    ),
    components(schemas(
        api::AnalyzeResponse,
        api::PickResponse,
        ytandel::analysis::Calibration,
        ytandel::analysis::Profile,
        ytandel::models::Category,
        ytandel::models::ProfileMode,
        ytandel::models::ReportRow,
    )),
    tags(
        (name = "Analysis", description = "Image analysis and report generation"),
        (name = "Calibration", description = "Reference color calibration")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Analyze {
            input,
            output,
            tolerance,
            profile,
            calibration,
        }) => run_analyze_command(&input, output, tolerance, profile, calibration).await,
        Some(Commands::Init { force }) => run_init_command(force),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ytandel=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(config = %asset_loader.config_source(), "Config source");

    if let Err(e) = asset_loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config file");
    }

    let state = server::create_app_state(asset_loader);
    state.calibration.load_persisted().await;

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Ytandel server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Analyze one file without a server.
async fn run_analyze_command(
    input: &PathBuf,
    output: Option<PathBuf>,
    tolerance: Option<f32>,
    profile: Option<ProfileMode>,
    calibration_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ytandel=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let asset_loader = Arc::new(AssetLoader::from_env());
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    let pipeline = AnalysisPipeline::new(config.clone());

    let repo: Arc<dyn CalibrationRepository> =
        match calibration_file.or_else(|| config.calibration_file.clone()) {
            Some(path) => Arc::new(JsonFileRepository::new(path)),
            None => Arc::new(InMemoryRepository::new()),
        };
    let calibration = CalibrationService::new(repo);
    calibration.load_persisted().await;

    let bytes = std::fs::read(input)?;
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bild.png".to_string());

    let outcome = pipeline
        .run(&bytes, &name, &calibration.get().await, tolerance, profile)
        .map_err(|e| anyhow::anyhow!("Analysis error: {e}"))?;

    print_console_table(&name, &outcome);

    let out_path = match output {
        Some(path) => path,
        None => input
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(&outcome.out_name),
    };
    std::fs::write(&out_path, &outcome.png)?;
    println!(
        "\nSparade rapport: {} ({} bytes)",
        out_path.display(),
        outcome.png.len()
    );

    Ok(())
}

/// The report table on stdout, mirroring the rendered legend.
fn print_console_table(name: &str, outcome: &ytandel::services::AnalysisOutcome) {
    let rule = "-".repeat(65);

    println!("\nANALYS: {name} [{}]", outcome.profile.as_str());
    println!("{rule}");
    println!("{:<38} {:>11} {:>12}", "Kategori", "% av Skog", "% av Total");
    println!("{rule}");

    if outcome.counts.forest_total() == 0 {
        println!("Ingen skogsmark identifierad i bilden.");
        println!("{rule}");
        return;
    }

    let mut separator_printed = false;
    for row in &outcome.rows {
        if row.emphasis && !separator_printed {
            println!("{rule}");
            separator_printed = true;
        }
        println!(
            "{:<38} {:>11} {:>12}",
            row.name, row.pct_of_forest, row.pct_of_total
        );
    }
    println!("{rule}");
}

/// Extract the embedded config to the filesystem
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let loader = AssetLoader::from_env();
    let report = loader.init(force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "Skipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Ytandel v{VERSION} - Areaanalys");
    println!("Land-cover share analysis of forest map captures\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader);

    println!("\nConfiguration ({}):", loader.config_source());
    println!("  tolerance        = {}", config.tolerance);
    println!("  profile          = {}", config.profile);
    println!(
        "  calibration_file = {}",
        config
            .calibration_file
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(persistence disabled)".to_string())
    );

    println!("\nCommands:");
    println!("  ytandel serve              Start the HTTP server");
    println!("  ytandel analyze <image>    Analyze a file and write the report PNG");
    println!("  ytandel init               Extract config.yaml for customization");
    println!("\nRun 'ytandel --help' for details.");
}
