//! Tests for rate limiting and session lifecycle
