use placefinder::config::Config;
use placefinder::engine::Engine;
use placefinder::server::serve;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("startup failed: {}", err);
            std::process::exit(1);
        }
    };

    let engine = match Engine::new(&config) {
        Ok(engine) => engine,
        Err(err) => {
            tracing::error!("startup failed: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = serve(engine, config.addr).await {
        tracing::error!("server error: {}", err);
        std::process::exit(1);
    }
}
