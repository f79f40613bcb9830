// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, sync::Arc};

use showup_api_server::{
    api::router,
    config::Config,
    logging,
    state::AppState,
    storage::{DocumentStore, MongoStore},
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    logging::init(config.log_format);

    if config.nutritionix.is_none() {
        warn!("Nutritionix credentials not configured; /api/nutrition will return 500");
    }
    if config.habitica.is_none() {
        warn!("Habitica credentials not configured; /api/habitica routes will return 500");
    }
    if !config.verify_ssl {
        warn!("Upstream TLS certificate verification is disabled");
    }

    // Initialize the document store (optional: without it only the proxy
    // and health routes are useful)
    let store: Option<Arc<dyn DocumentStore>> = match &config.mongodb_uri {
        Some(uri) => {
            let store = MongoStore::connect(uri, &config.mongodb_db)
                .await
                .expect("Failed to create MongoDB client");
            Some(Arc::new(store))
        }
        None => {
            warn!("MONGODB_URI not set; habits API disabled");
            None
        }
    };

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .expect("Failed to parse bind address");

    let state = AppState::new(config, store.clone());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    info!(%addr, "ShowUp API listening (docs at /docs)");

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .expect("HTTP server failed");

    if let Some(store) = store {
        store.close().await;
    }
    info!("ShowUp API stopped");
}

async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
    shutdown.cancel();
}
