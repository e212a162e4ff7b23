//! Shared test utilities for prism integration tests.
//!
//! This module provides:
//! - `TestHarness` for isolated runs against a temp database
//! - Scripted inference and counting store doubles
//! - Builders for PDF, DOCX and profile fixtures

#![allow(unused_imports)]

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{CountingStore, ScriptedInference, TestHarness};
