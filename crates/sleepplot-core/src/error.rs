//! Core error types for sleepplot-core.
//!
//! This module defines the error hierarchy using thiserror. Service failures
//! are never swallowed: they bubble up through [`CoreError`] and end the run.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sleepplot-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Wellness service failures
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Tabular file and flattening errors
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The plotly.js library could not be obtained
    #[error("Chart asset error: {0}")]
    Asset(String),
}

/// Errors raised by the single-day fetch capability.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No session token is available
    #[error("Not authenticated with {service}")]
    NotAuthenticated { service: String },

    /// The request never produced a response
    #[error("Request for {date} failed: {source}")]
    Transport {
        date: chrono::NaiveDate,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status
    #[error("Request for {date} failed: HTTP {status}")]
    Status {
        date: chrono::NaiveDate,
        status: u16,
    },

    /// The response body was not the expected JSON
    #[error("Could not decode response for {date}: {message}")]
    Decode {
        date: chrono::NaiveDate,
        message: String,
    },

    /// Credential store failure
    #[error("Credential store error: {0}")]
    Credentials(String),

    /// Runtime or client construction failure
    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

/// Errors produced while building or reading the sleep table.
#[derive(Error, Debug)]
pub enum TableError {
    /// A column the normalizer needs is not present
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A cell could not be parsed into the expected type
    #[error("Invalid value '{value}' in column '{column}' (row {row})")]
    InvalidCell {
        column: String,
        row: usize,
        value: String,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// The home/config directory could not be prepared
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Invalid date range
    #[error("Invalid date range: {start} .. {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
