// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversion of MongoDB-native values into JSON-friendly ones.
//!
//! `ObjectId`s become their hex string and `DateTime`s become RFC 3339 text
//! (UTC, millisecond precision). Arrays and embedded documents are walked
//! recursively with order preserved; every other value is left untouched.
//! Normalizing an already normalized value is a no-op.

use bson::{Bson, DateTime, Document};
use chrono::SecondsFormat;
use serde_json::Value;

pub fn normalize(value: Bson) -> Bson {
    match value {
        Bson::ObjectId(id) => Bson::String(id.to_hex()),
        Bson::DateTime(timestamp) => Bson::String(format_timestamp(timestamp)),
        Bson::Array(items) => Bson::Array(items.into_iter().map(normalize).collect()),
        Bson::Document(document) => Bson::Document(normalize_document(document)),
        other => other,
    }
}

pub fn normalize_document(document: Document) -> Document {
    document
        .into_iter()
        .map(|(key, value)| (key, normalize(value)))
        .collect()
}

/// Normalize and render as plain JSON.
pub fn to_json(value: Bson) -> Value {
    normalize(value).into_relaxed_extjson()
}

fn format_timestamp(timestamp: DateTime) -> String {
    timestamp
        .to_chrono()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
