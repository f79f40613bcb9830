// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Insert demo habits into the configured MongoDB database.

use std::process::ExitCode;

use showup_api_server::{
    config::Config,
    logging, seed,
    storage::{DocumentStore, MongoStore},
};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();
    logging::init(config.log_format);

    let Some(uri) = config.mongodb_uri.as_deref() else {
        error!("Set MONGODB_URI in environment");
        return ExitCode::FAILURE;
    };

    let store = match MongoStore::connect(uri, &config.mongodb_db).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Failed to create MongoDB client");
            return ExitCode::FAILURE;
        }
    };

    let result = seed::seed_habits(&store).await;
    store.close().await;

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Seeding failed");
            ExitCode::FAILURE
        }
    }
}
