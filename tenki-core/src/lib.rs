//! Core library for the `tenki` CLI.
//!
//! This crate defines:
//! - Date-range resolution and the Open-Meteo request descriptor
//! - The weather provider abstraction and its Open-Meteo implementation
//! - Parsing of the response into typed daily/hourly records
//! - Console and CSV output formatting, and the output sinks
//! - Configuration for the CSV export directory
//!
//! It is used by `tenki-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod provider;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{DailyRecord, DateRange, HourlyRecord, OutputMode, WeatherQuery};
pub use provider::{OpenMeteoClient, WeatherProvider};
