//! # snyk-test-frequency
//!
//! A CLI tool for bulk-updating the recurring test frequency of Snyk projects
//! in an organization, filtered by project type category (open source, IaC,
//! container, or all).
//!
//! This library provides the core functionality behind the CLI: the Snyk API
//! client, project type classification, filtering, and the update driver.

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod filtering;
pub mod output;
pub mod project;
pub mod updater;
