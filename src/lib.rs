// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ShowUp API - nutrition, habits, and task-tracker integration backend
//!
//! This crate exposes one HTTP API in front of the Nutritionix lookup
//! service, the Habitica task tracker, and a MongoDB collection of habits.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `providers` - Outbound Nutritionix and Habitica clients
//! - `storage` - Document store abstraction (MongoDB, in-memory)
//! - `normalize` - MongoDB value to JSON conversion

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod seed;
pub mod state;
pub mod storage;
