use runstats_api::{api, config::AppConfig, db};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env();
    let db_pool = db::init_db().await;

    api::run_api(db_pool, config).await
}
