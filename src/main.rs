use clap::Parser;
use hr_architect::utils::error::ErrorSeverity;
use hr_architect::utils::{logger, validation::Validate};
use hr_architect::{
    build_router, AppState, ScoringEngine, ServiceConfig, StrategyEngine, WatsonxClient,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!(
        "🚀 Starting HR Strategic Restructuring Agent v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::debug!("Service config: {:?}", config);

    // 驗證配置
    let scoring_config = match config.validate().and_then(|_| config.load_scoring_config()) {
        Ok(scoring) => scoring,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::Medium | ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };
    tracing::info!(
        "✅ Scoring config v{} loaded (HQ capacity {}, risk threshold {})",
        scoring_config.version,
        scoring_config.allocation.hq_capacity,
        scoring_config.risk.salary_threshold
    );

    let address = config.bind_address();
    let generator = Arc::new(WatsonxClient::new(config));
    let engine = StrategyEngine::new(ScoringEngine::new(scoring_config), generator);
    let app = build_router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("📡 Listening on http://{}", address);
    tracing::info!("Health check: http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
