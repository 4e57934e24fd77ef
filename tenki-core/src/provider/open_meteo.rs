use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{DailyRecord, HourlyRecord, WeatherQuery};
use crate::provider::{WeatherProvider, truncate_body};

const API_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Open-Meteo forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_url(API_URL.to_string())
    }

    /// Point the client at a different endpoint, e.g. a local mock server.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn fetch(&self, query: &WeatherQuery) -> Result<ForecastResponse> {
        let params = query.params();
        tracing::debug!(url = %self.base_url, ?params, "requesting forecast");

        let res = self
            .http
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|source| Error::Transport { source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| Error::Transport { source })?;

        if !status.is_success() {
            return Err(Error::Upstream {
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("malformed forecast response: {e}")))
    }
}

/// Typed Open-Meteo payload. Only the section matching the requested
/// variable set is present; the other stays `None`.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub daily: Option<DailySeries>,
    pub hourly: Option<HourlySeries>,
}

/// Parallel per-day arrays, one entry per calendar day in the range.
#[derive(Debug, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    #[serde(rename = "weathercode")]
    pub weather_code: Vec<u16>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
    #[serde(rename = "windspeed_10m_max")]
    pub wind_speed_max: Vec<f64>,
}

/// Parallel per-hour arrays, 24 entries per day in the range.
#[derive(Debug, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(rename = "weathercode")]
    pub weather_code: Vec<u16>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Vec<f64>,
    pub precipitation: Vec<f64>,
    #[serde(rename = "windspeed_10m")]
    pub wind_speed: Vec<f64>,
}

impl ForecastResponse {
    /// Zip the daily arrays into records, oldest first (the order the API
    /// returned them in).
    pub fn daily_records(self) -> Result<Vec<DailyRecord>> {
        let daily = self
            .daily
            .ok_or_else(|| Error::Parse("response has no daily section".to_string()))?;
        daily.into_records()
    }

    /// Zip the hourly arrays into records, oldest first.
    pub fn hourly_records(self) -> Result<Vec<HourlyRecord>> {
        let hourly = self
            .hourly
            .ok_or_else(|| Error::Parse("response has no hourly section".to_string()))?;
        hourly.into_records()
    }
}

impl DailySeries {
    fn into_records(self) -> Result<Vec<DailyRecord>> {
        let len = self.time.len();
        expect_len("weathercode", len, self.weather_code.len())?;
        expect_len("temperature_2m_max", len, self.temperature_max.len())?;
        expect_len("temperature_2m_min", len, self.temperature_min.len())?;
        expect_len("precipitation_sum", len, self.precipitation_sum.len())?;
        expect_len("windspeed_10m_max", len, self.wind_speed_max.len())?;

        let mut records = Vec::with_capacity(len);
        for (i, time) in self.time.iter().enumerate() {
            let date = NaiveDate::parse_from_str(time, "%Y-%m-%d")
                .map_err(|_| Error::Parse(format!("unparseable date '{time}'")))?;
            records.push(DailyRecord {
                date,
                weather_code: self.weather_code[i],
                temperature_max: self.temperature_max[i],
                temperature_min: self.temperature_min[i],
                precipitation_sum: self.precipitation_sum[i],
                wind_speed_max: self.wind_speed_max[i],
            });
        }
        Ok(records)
    }
}

impl HourlySeries {
    fn into_records(self) -> Result<Vec<HourlyRecord>> {
        let len = self.time.len();
        expect_len("weathercode", len, self.weather_code.len())?;
        expect_len("temperature_2m", len, self.temperature.len())?;
        expect_len("precipitation", len, self.precipitation.len())?;
        expect_len("windspeed_10m", len, self.wind_speed.len())?;

        let mut records = Vec::with_capacity(len);
        for (i, time) in self.time.iter().enumerate() {
            let timestamp = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
                .map_err(|_| Error::Parse(format!("unparseable timestamp '{time}'")))?;
            records.push(HourlyRecord {
                timestamp,
                weather_code: self.weather_code[i],
                temperature: self.temperature[i],
                precipitation: self.precipitation[i],
                wind_speed: self.wind_speed[i],
            });
        }
        Ok(records)
    }
}

fn expect_len(field: &str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::Parse(format!(
            "field '{field}' has {actual} entries, expected {expected}"
        )))
    }
}
