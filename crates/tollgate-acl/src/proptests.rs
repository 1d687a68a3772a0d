//! Property-based tests for rule resolution.
