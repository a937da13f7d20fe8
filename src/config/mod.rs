//! Configuration types and options for the application.
//!
//! This module contains all configuration structures used throughout the
//! application: the project filter, execution options, the config file layer
//! and credential resolution.

pub mod execution;
pub mod file;
pub mod filter;
pub mod resolve;

pub use execution::{DEFAULT_DELAY_MS, ExecutionOptions, TestFrequency};
pub use file::FileConfig;
pub use filter::ProjectFilter;
pub use resolve::{Credentials, resolve_frequency};
