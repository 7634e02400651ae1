use eco_rewards_matcher::{
    api, create_pool, AppConfig, CatalogStore, FuzzyMatcher, MemoryCatalogStore,
    PgCatalogStore, ReceiptMatcher, RecommendationService,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 目录来源：CSV 优先，其次数据库
    let store: Arc<dyn CatalogStore> = match (&config.catalog.csv_path, &config.database.url) {
        (Some(path), _) => Arc::new(MemoryCatalogStore::from_csv_path(path)?),
        (None, Some(url)) => Arc::new(PgCatalogStore::new(create_pool(url).await?)),
        (None, None) => return Err("no catalog source configured".into()),
    };

    let matcher = FuzzyMatcher::new(config.matching.threshold, config.matching.max_results);
    let receipt_matcher = Arc::new(ReceiptMatcher::new(store.clone(), matcher));
    let recommendation = Arc::new(RecommendationService::new(
        store,
        config.recommendation.default_limit,
        config.recommendation.top_limit,
    ));

    let app = api::router(receipt_matcher, recommendation);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/receipts/match              - receipt line items -> points");
    info!("  GET  /api/products/:id/alternatives   - greener substitutes");
    info!("  POST /api/products/compare            - rank products by score");
    info!("  GET  /api/products/top                - top sustainable products");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
