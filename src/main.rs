// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;
use user_service::{
    api::router,
    auth::TokenCodec,
    config::AppConfig,
    state::AppState,
    storage::UserDatabase,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install shutdown signal handler");
}

#[tokio::main]
async fn main() {
    init_tracing();

    // An unusable signing key makes the whole service meaningless, so
    // configuration errors abort startup.
    let config = AppConfig::from_env().expect("Invalid configuration");

    let db = UserDatabase::open(&config.data_dir.join("users.redb"))
        .expect("Failed to open user database");
    let codec = TokenCodec::new(&config.signing_key, config.token_ttl_ms);

    let state = AppState::new(db, codec);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!(%addr, "user service listening (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}
