use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wealth_tracker::{
    Portfolio, Result, TracingDiagnostics,
    config::{database, settings},
    display, generate_summary,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Load .env file (non-fatal, env vars can be set externally)
    dotenvy::dotenv().ok();

    // 2. Load settings; the log level lives there, so this precedes tracing setup
    let settings = settings::load_default_settings()?;

    // 3. Initialize tracing; RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level)),
        )
        .init();
    info!("Configuration loaded.");

    // 4. Connect and ensure the schema exists
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Open one store per partition
    let portfolio = Portfolio::open(&db, &settings.partitions, Arc::new(TracingDiagnostics))
        .await
        .inspect_err(|e| error!("Failed to open partitions: {}", e))?;

    // 6. Print the summary
    let summary = generate_summary(&portfolio).await?;
    print!("{}", display::render_summary(&summary));

    Ok(())
}
