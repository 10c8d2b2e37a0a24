// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Auto-dismiss**: How long non-loading notifications stay on screen
//! - **Display**: How many notifications a renderer shows at once
//! - **Diagnostics**: Event buffer capacity bounds

// ==========================================================================
// Auto-dismiss Defaults
// ==========================================================================

/// Default auto-dismiss delay for every kind except loading (in milliseconds).
pub const DEFAULT_DURATION_MS: u64 = 5_000;

/// Minimum configurable auto-dismiss delay (in milliseconds).
pub const MIN_DURATION_MS: u64 = 1;

/// Maximum configurable auto-dismiss delay (10 minutes).
pub const MAX_DURATION_MS: u64 = 600_000;

/// Loading notifications never auto-dismiss unless told otherwise.
pub const LOADING_DURATION_MS: u64 = 0;

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Maximum number of notifications visible at once.
pub const DEFAULT_MAX_VISIBLE: usize = 3;

/// Smallest visible window a renderer may request.
pub const MIN_MAX_VISIBLE: usize = 1;

/// Largest visible window a renderer may request.
pub const MAX_MAX_VISIBLE: usize = 50;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1_000;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_DURATION_MS > 0);
    assert!(MAX_DURATION_MS >= MIN_DURATION_MS);
    assert!(DEFAULT_DURATION_MS >= MIN_DURATION_MS);
    assert!(DEFAULT_DURATION_MS <= MAX_DURATION_MS);
    assert!(LOADING_DURATION_MS == 0);

    assert!(MIN_MAX_VISIBLE > 0);
    assert!(MAX_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_MAX_VISIBLE <= MAX_MAX_VISIBLE);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_defaults_are_valid() {
        assert_eq!(DEFAULT_DURATION_MS, 5_000);
        assert!(DEFAULT_DURATION_MS >= MIN_DURATION_MS);
        assert!(DEFAULT_DURATION_MS <= MAX_DURATION_MS);
        assert_eq!(LOADING_DURATION_MS, 0);
    }

    #[test]
    fn display_defaults_are_valid() {
        assert_eq!(DEFAULT_MAX_VISIBLE, 3);
        assert!(DEFAULT_MAX_VISIBLE >= MIN_MAX_VISIBLE);
        assert!(DEFAULT_MAX_VISIBLE <= MAX_MAX_VISIBLE);
    }

    #[test]
    fn diagnostics_defaults_are_valid() {
        assert_eq!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, 1_000);
        assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
    }
}
