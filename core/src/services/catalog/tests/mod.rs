//! Tests for catalog service

#[cfg(test)]
mod service_tests;
