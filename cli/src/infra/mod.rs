//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! Cloud Foundry CLI adapter, embedded assets, randomness, time and the
//! config file.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod assets;
pub mod cf;
pub mod clock;
pub mod command_runner;
pub mod config;
pub mod naming;
