// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! In-process observation layer for outbound HTTP traffic.
//!
//! This library wires interceptor hooks around a shared hyper client and
//! records every observed transaction into an in-memory repository that a
//! diagnostic console or log viewer can read back.

pub mod body;
pub mod client;
pub mod config;
pub mod entry;
pub mod error;
pub mod history;
pub mod interceptor;
pub mod recorder;
pub mod repository;
pub mod serde_helpers;
pub mod test_helpers;

// Keep library small; main.rs remains the binary entrypoint.
