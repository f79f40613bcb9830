// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage
//!
//! Handlers talk to the document database through the [`DocumentStore`]
//! trait. A single store handle is opened at startup, shared by every
//! request, and closed on shutdown.
//!
//! ## Backends
//!
//! - [`MongoStore`] - the MongoDB driver; the driver pools connections itself
//! - [`InMemoryStore`] - process-local documents, used by tests and the seed
//!   tooling tests
//!
//! ## Collections
//!
//! ```text
//! habits/
//!   { _id: ObjectId, name: string, notes: string, createdAt: date }
//! ```

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use bson::Document;

pub use memory::InMemoryStore;
pub use mongo::MongoStore;

/// Collection holding habit documents.
pub const HABITS_COLLECTION: &str = "habits";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database not configured")]
    NotConfigured,

    #[error("{0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("unsupported query: {0}")]
    UnsupportedQuery(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Query shape for [`DocumentStore::find_all`], mirroring the MongoDB
/// `find` filter, projection, and sort documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub filter: Document,
    pub projection: Option<Document>,
    pub sort: Option<Document>,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Document) -> Self {
        self.filter = filter;
        self
    }

    pub fn projection(mut self, projection: Document) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Name of the database this handle points at.
    fn database_name(&self) -> &str;

    /// Lightweight round trip to the server.
    async fn ping(&self) -> StoreResult<()>;

    /// Run a query and materialize every matching document in cursor order.
    async fn find_all(&self, collection: &str, options: FindOptions)
        -> StoreResult<Vec<Document>>;

    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<()>;

    /// Release the underlying connections.
    async fn close(&self);
}
