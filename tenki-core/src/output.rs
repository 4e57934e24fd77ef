use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{DailyRecord, DateRange, HourlyRecord};

/// Columns available in the CSV export, in their default order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvColumn {
    Timestamp,
    WeatherCode,
    Temperature,
    Precipitation,
    WindSpeed,
}

pub const DEFAULT_CSV_COLUMNS: [CsvColumn; 5] = [
    CsvColumn::Timestamp,
    CsvColumn::WeatherCode,
    CsvColumn::Temperature,
    CsvColumn::Precipitation,
    CsvColumn::WindSpeed,
];

impl CsvColumn {
    pub fn header(self) -> &'static str {
        match self {
            CsvColumn::Timestamp => "timestamp",
            CsvColumn::WeatherCode => "weather_code",
            CsvColumn::Temperature => "temperature",
            CsvColumn::Precipitation => "precipitation",
            CsvColumn::WindSpeed => "wind_speed",
        }
    }

    fn value(self, record: &HourlyRecord) -> String {
        match self {
            CsvColumn::Timestamp => record.timestamp.format("%Y-%m-%dT%H").to_string(),
            CsvColumn::WeatherCode => record.weather_code.to_string(),
            CsvColumn::Temperature => format!("{:.1}", record.temperature),
            CsvColumn::Precipitation => format!("{:.1}", record.precipitation),
            CsvColumn::WindSpeed => format!("{:.1}", record.wind_speed),
        }
    }
}

/// Map column names from the command line to [`CsvColumn`]s, keeping the
/// caller's order.
pub fn parse_columns(names: &[String]) -> Result<Vec<CsvColumn>> {
    names
        .iter()
        .map(|name| match name.as_str() {
            "timestamp" => Ok(CsvColumn::Timestamp),
            "weather_code" => Ok(CsvColumn::WeatherCode),
            "temperature" => Ok(CsvColumn::Temperature),
            "precipitation" => Ok(CsvColumn::Precipitation),
            "wind_speed" => Ok(CsvColumn::WindSpeed),
            other => Err(Error::InvalidInput(format!(
                "unknown CSV column '{other}', expected one of: timestamp, weather_code, \
                 temperature, precipitation, wind_speed"
            ))),
        })
        .collect()
}

/// Render daily records as console lines, one per day, oldest first.
pub fn format_console(records: &[DailyRecord]) -> String {
    let mut out = String::new();
    for r in records {
        out.push_str(&format!(
            "{}: {} (code {}), max {:.1}°C, min {:.1}°C, precipitation {:.1}mm, max wind {:.1}m/s\n",
            r.date,
            describe_weather_code(r.weather_code),
            r.weather_code,
            r.temperature_max,
            r.temperature_min,
            r.precipitation_sum,
            r.wind_speed_max,
        ));
    }
    out
}

/// Render hourly records as CSV text: header row, then one row per record
/// in input order. Built fully in memory so the sink can write it in one
/// operation.
pub fn format_csv(records: &[HourlyRecord], columns: &[CsvColumn]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(columns.iter().map(|c| c.header()))
        .map_err(io::Error::other)?;
    for record in records {
        writer
            .write_record(columns.iter().map(|c| c.value(record)))
            .map_err(io::Error::other)?;
    }

    let bytes = writer.into_inner().map_err(io::Error::other)?;
    let text = String::from_utf8(bytes).map_err(io::Error::other)?;
    Ok(text)
}

/// Write a formatted block to stdout.
pub fn write_console(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Destination for a CSV export.
///
/// Single-date runs get a dated subfolder, range runs a flat file directly
/// under the base directory; both naming schemes are an external contract.
/// An existing file is never overwritten: a `_1`, `_2`, ... suffix is tried
/// until a free name is found.
pub fn csv_destination(base_dir: &Path, range: &DateRange) -> PathBuf {
    let (dir, stem) = if range.is_single_day() {
        (
            base_dir.join(range.start.to_string()),
            format!("weather_data_{}", range.start),
        )
    } else {
        (
            base_dir.to_path_buf(),
            format!("weather_data_{}_{}", range.start, range.end),
        )
    };

    let mut path = dir.join(format!("{stem}.csv"));
    let mut counter = 1;
    while path.exists() {
        path = dir.join(format!("{stem}_{counter}.csv"));
        counter += 1;
    }
    path
}

/// Write the complete CSV text to `path`, creating missing directories.
pub fn write_csv_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "CSV written");
    Ok(())
}

/// WMO weather interpretation codes.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn describe_weather_code(code: u16) -> &'static str {
    match code {
        0 => "clear sky",
        1 => "mainly clear",
        2 => "partly cloudy",
        3 => "overcast",
        45 => "fog",
        48 => "depositing rime fog",
        51 => "light drizzle",
        53 => "moderate drizzle",
        55 => "dense drizzle",
        56 => "light freezing drizzle",
        57 => "dense freezing drizzle",
        61 => "slight rain",
        63 => "moderate rain",
        65 => "heavy rain",
        66 => "light freezing rain",
        67 => "heavy freezing rain",
        71 => "slight snow fall",
        73 => "moderate snow fall",
        75 => "heavy snow fall",
        77 => "snow grains",
        80 => "slight rain showers",
        81 => "moderate rain showers",
        82 => "violent rain showers",
        85 => "slight snow showers",
        86 => "heavy snow showers",
        95 => "thunderstorm",
        96 => "thunderstorm with slight hail",
        99 => "thunderstorm with heavy hail",
        _ => "unknown",
    }
}
