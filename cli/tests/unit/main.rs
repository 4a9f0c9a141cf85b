//! Unit tests for gonut CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod architecture;
mod push_service;
