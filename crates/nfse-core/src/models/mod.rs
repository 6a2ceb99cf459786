//! Data models: configuration and extraction results.

pub mod config;
pub mod result;
