// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Demo habits for a fresh database.

use bson::{doc, DateTime};
use tracing::info;

use crate::storage::{DocumentStore, StoreResult, HABITS_COLLECTION};

/// Name and notes of each demo habit.
pub const DEMO_HABITS: [(&str, &str); 2] = [("Drink water", "8 cups"), ("Walk 10 minutes", "")];

/// Insert the demo habits, all stamped with the current time, and return
/// their names in insertion order.
pub async fn seed_habits(store: &dyn DocumentStore) -> StoreResult<Vec<String>> {
    let created_at = DateTime::now();
    let mut names = Vec::with_capacity(DEMO_HABITS.len());

    for (name, notes) in DEMO_HABITS {
        store
            .insert_one(
                HABITS_COLLECTION,
                doc! { "name": name, "notes": notes, "createdAt": created_at },
            )
            .await?;
        names.push(name.to_string());
    }

    info!(habits = ?names, "Seeded habits");
    Ok(names)
}
