// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! TTL-based index invalidation.
//!
//! Staleness is checked lazily, only when a query arrives. No background
//! timers run inside the engine, so an idle engine costs nothing.

use std::time::{Duration, Instant};

/// Default maximum index age before a rebuild is forced.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Decides when the index must be rebuilt.
///
/// When `enabled` is false the index is never rebuilt or consulted — every
/// query takes the fallback path instead.
#[derive(Debug, Clone, Copy)]
pub struct FreshnessPolicy {
    pub enabled: bool,
    pub ttl: Duration,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: DEFAULT_TTL,
        }
    }
}

impl FreshnessPolicy {
    /// Whether a rebuild is required before the next scoring pass.
    ///
    /// `built_at` is `None` when the index has never been built (or was
    /// explicitly cleared).
    pub fn needs_rebuild(&self, built_at: Option<Instant>, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        match built_at {
            None => true,
            Some(at) => now.saturating_duration_since(at) > self.ttl,
        }
    }
}
