//! Tests for the token service

#[cfg(test)]
mod service_tests;
