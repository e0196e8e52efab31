// ABOUTME: Advisory integration configuration: enable flag, timeout, cache size and rate limit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Optional advisory integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// Whether advisory calls are made at all
    pub enabled: bool,
    /// Deadline for one call (milliseconds)
    pub timeout_ms: u64,
    /// Cached responses kept
    pub cache_capacity: usize,
    /// Calls allowed per rolling minute
    pub max_calls_per_minute: u32,
    /// Longest free-text response accepted (characters)
    pub max_response_chars: usize,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_ms: 1_500,
            cache_capacity: 256,
            max_calls_per_minute: 30,
            max_response_chars: 500,
        }
    }
}
