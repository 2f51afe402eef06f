//! Tests for media intake
