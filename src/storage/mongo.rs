// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! MongoDB-backed [`DocumentStore`].

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Client, Database};
use tracing::info;

use super::{DocumentStore, FindOptions, StoreResult};

pub struct MongoStore {
    client: Client,
    database: Database,
    database_name: String,
}

impl MongoStore {
    /// Create a client for `uri` and select `database_name`.
    ///
    /// Only the connection string is parsed here; the driver opens sockets
    /// on first use, so an unreachable server surfaces on the first query
    /// or ping rather than at startup.
    pub async fn connect(uri: &str, database_name: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let database = client.database(database_name);

        info!(database = %database_name, "MongoDB client created");

        Ok(Self {
            client,
            database,
            database_name: database_name.to_string(),
        })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn database_name(&self) -> &str {
        &self.database_name
    }

    async fn ping(&self) -> StoreResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn find_all(
        &self,
        collection: &str,
        options: FindOptions,
    ) -> StoreResult<Vec<Document>> {
        let collection = self.database.collection::<Document>(collection);
        let mut find = collection.find(options.filter);
        if let Some(projection) = options.projection {
            find = find.projection(projection);
        }
        if let Some(sort) = options.sort {
            find = find.sort(sort);
        }

        let cursor = find.await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<()> {
        self.database
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        info!(database = %self.database_name, "MongoDB client closed");
    }
}
