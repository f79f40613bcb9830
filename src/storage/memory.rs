// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process [`DocumentStore`].
//!
//! Understands the subset of MongoDB query documents the API issues:
//! equality filters, `{field: 0|1}` projections, and `{field: 1|-1}` sorts.
//! Inserted documents get an `ObjectId` `_id` the way a server assigns one.

use std::{cmp::Ordering, collections::HashMap};

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use super::{DocumentStore, FindOptions, StoreError, StoreResult};

const ID_FIELD: &str = "_id";

#[derive(Default)]
pub struct InMemoryStore {
    database_name: String,
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new(database_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            collections: RwLock::default(),
        }
    }

    /// Number of documents currently held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn database_name(&self) -> &str {
        &self.database_name
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_all(
        &self,
        collection: &str,
        options: FindOptions,
    ) -> StoreResult<Vec<Document>> {
        let mut matched: Vec<Document> = {
            let collections = self.collections.read().await;
            collections
                .get(collection)
                .map(|documents| {
                    documents
                        .iter()
                        .filter(|document| matches_filter(document, &options.filter))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };

        if let Some(sort) = &options.sort {
            let keys = sort_keys(sort)?;
            matched.sort_by(|a, b| compare_documents(a, b, &keys));
        }

        match &options.projection {
            Some(projection) => {
                let projection = Projection::parse(projection)?;
                Ok(matched
                    .into_iter()
                    .map(|document| projection.apply(document))
                    .collect())
            }
            None => Ok(matched),
        }
    }

    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<()> {
        let document = if document.contains_key(ID_FIELD) {
            document
        } else {
            let mut with_id = Document::new();
            with_id.insert(ID_FIELD, ObjectId::new());
            for (key, value) in document {
                with_id.insert(key, value);
            }
            with_id
        };

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn close(&self) {}
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

fn sort_keys(sort: &Document) -> StoreResult<Vec<(String, bool)>> {
    sort.iter()
        .map(|(key, direction)| match as_number(direction) {
            Some(d) if d == 1.0 => Ok((key.clone(), true)),
            Some(d) if d == -1.0 => Ok((key.clone(), false)),
            _ => Err(StoreError::UnsupportedQuery(format!(
                "sort direction for '{key}' must be 1 or -1"
            ))),
        })
        .collect()
}

fn compare_documents(a: &Document, b: &Document, keys: &[(String, bool)]) -> Ordering {
    for (key, ascending) in keys {
        let ordering = compare_values(a.get(key), b.get(key));
        let ordering = if *ascending {
            ordering
        } else {
            ordering.reverse()
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

// Missing values sort before present ones, like null in MongoDB.
fn compare_values(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Bson::DateTime(a), Bson::DateTime(b)) => a.cmp(b),
            (Bson::String(a), Bson::String(b)) => a.cmp(b),
            (Bson::ObjectId(a), Bson::ObjectId(b)) => a.cmp(b),
            (Bson::Boolean(a), Bson::Boolean(b)) => a.cmp(b),
            _ => match (as_number(a), as_number(b)) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            },
        },
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

enum Projection {
    Exclude(Vec<String>),
    Include { fields: Vec<String>, keep_id: bool },
}

impl Projection {
    fn parse(projection: &Document) -> StoreResult<Self> {
        let mut included = Vec::new();
        let mut excluded = Vec::new();

        for (key, flag) in projection {
            let keep = match flag {
                Bson::Boolean(b) => *b,
                other => match as_number(other) {
                    Some(n) => n != 0.0,
                    None => {
                        return Err(StoreError::UnsupportedQuery(format!(
                            "projection for '{key}' must be 0 or 1"
                        )))
                    }
                },
            };
            if keep {
                included.push(key.clone());
            } else {
                excluded.push(key.clone());
            }
        }

        if included.is_empty() {
            return Ok(Self::Exclude(excluded));
        }

        // Inclusion projections may only exclude `_id`.
        if excluded.iter().any(|key| key != ID_FIELD) {
            return Err(StoreError::UnsupportedQuery(
                "cannot mix inclusion and exclusion in a projection".to_string(),
            ));
        }

        Ok(Self::Include {
            keep_id: excluded.is_empty(),
            fields: included,
        })
    }

    fn apply(&self, mut document: Document) -> Document {
        match self {
            Self::Exclude(fields) => {
                for field in fields {
                    document.remove(field);
                }
                document
            }
            Self::Include { fields, keep_id } => document
                .into_iter()
                .filter(|(key, _)| {
                    (key == ID_FIELD && *keep_id) || fields.iter().any(|field| field == key)
                })
                .collect(),
        }
    }
}
