use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use exchange_engine::config::ExchangeConfig;
use exchange_engine::exchange::ExchangeContext;
use exchange_engine::http::build_router;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ExchangeConfig::parse_args();
    let ctx = Arc::new(ExchangeContext::bootstrap(&config));
    let router = build_router(Arc::clone(&ctx), config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind listen address");
    tracing::info!(addr = %config.listen_addr, "exchange listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    ctx.shutdown();
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
}
