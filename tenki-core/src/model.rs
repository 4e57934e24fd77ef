use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Tokyo Station.
pub const LATITUDE: f64 = 35.681236;
pub const LONGITUDE: f64 = 139.767125;

/// All timestamps are requested and reported in this zone.
pub const TIMEZONE: &str = "Asia/Tokyo";

/// How many days the default window covers, ending on "today".
pub const TRAILING_WINDOW_DAYS: u64 = 14;

const DAILY_VARIABLES: &str =
    "weathercode,temperature_2m_max,temperature_2m_min,precipitation_sum,windspeed_10m_max";
const HOURLY_VARIABLES: &str = "temperature_2m,precipitation,windspeed_10m,weathercode";

/// Which of the two output shapes an invocation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Daily summary rows on stdout.
    Console,
    /// Hourly detail rows written to a CSV file.
    Csv,
}

/// Inclusive date window to query. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Resolve the window from an optional `YYYY-MM-DD` argument.
    ///
    /// `today` is passed in explicitly so callers (and tests) control the
    /// clock. With no argument the range is the trailing
    /// [`TRAILING_WINDOW_DAYS`]-day window ending on `today`.
    pub fn resolve(today: NaiveDate, arg: Option<&str>) -> Result<Self> {
        match arg {
            Some(s) => {
                let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                    Error::InvalidInput(format!(
                        "invalid date '{s}', expected YYYY-MM-DD (e.g. 2024-01-01)"
                    ))
                })?;
                Ok(Self {
                    start: date,
                    end: date,
                })
            }
            None => Ok(Self {
                start: today - Days::new(TRAILING_WINDOW_DAYS - 1),
                end: today,
            }),
        }
    }

    /// True for ranges produced from an explicit date argument.
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }
}

/// Request descriptor for one Open-Meteo call: where, when, and which
/// variable set. The variable set is decided here and nowhere else.
#[derive(Debug, Clone, Copy)]
pub struct WeatherQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub range: DateRange,
    pub mode: OutputMode,
}

impl WeatherQuery {
    /// Query for the fixed Tokyo Station coordinates.
    pub fn tokyo(range: DateRange, mode: OutputMode) -> Self {
        Self {
            latitude: LATITUDE,
            longitude: LONGITUDE,
            range,
            mode,
        }
    }

    /// Outbound query parameters, ready for URL encoding.
    ///
    /// Console mode requests the daily variable set, CSV mode the hourly
    /// one; everything else is independent of the mode.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("start_date", self.range.start.format("%Y-%m-%d").to_string()),
            ("end_date", self.range.end.format("%Y-%m-%d").to_string()),
            ("timezone", TIMEZONE.to_string()),
        ];
        match self.mode {
            OutputMode::Console => params.push(("daily", DAILY_VARIABLES.to_string())),
            OutputMode::Csv => params.push(("hourly", HOURLY_VARIABLES.to_string())),
        }
        params
    }
}

/// One calendar day of weather, as shown on the console.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub weather_code: u16,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub precipitation_sum: f64,
    pub wind_speed_max: f64,
}

/// One hour of weather, as exported to CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    pub timestamp: NaiveDateTime,
    pub weather_code: u16,
    pub temperature: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn resolve_explicit_date_is_single_day() {
        let today = date(2024, 6, 15);
        let range = DateRange::resolve(today, Some("2024-01-01")).unwrap();
        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.end, date(2024, 1, 1));
        assert!(range.is_single_day());
    }

    #[test]
    fn resolve_no_argument_is_trailing_window() {
        let today = date(2024, 6, 15);
        let range = DateRange::resolve(today, None).unwrap();
        assert_eq!(range.end, today);
        assert_eq!(range.start, date(2024, 6, 2));
        // 14 days inclusive
        assert_eq!((range.end - range.start).num_days(), 13);
        assert!(!range.is_single_day());
    }

    #[test]
    fn resolve_window_crosses_month_boundary() {
        let today = date(2024, 3, 5);
        let range = DateRange::resolve(today, None).unwrap();
        assert_eq!(range.start, date(2024, 2, 21));
    }

    #[test]
    fn resolve_rejects_malformed_date() {
        let today = date(2024, 6, 15);
        for bad in ["2024/01/01", "01-01-2024", "yesterday", "", "2024-1-1x"] {
            let err = DateRange::resolve(today, Some(bad)).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{bad}");
        }
    }

    #[test]
    fn resolve_rejects_calendrically_invalid_date() {
        let today = date(2024, 6, 15);
        let err = DateRange::resolve(today, Some("2023-02-29")).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn params_variable_list_depends_only_on_mode() {
        let single = DateRange::resolve(date(2024, 6, 15), Some("2024-01-01")).unwrap();
        let window = DateRange::resolve(date(2024, 6, 15), None).unwrap();

        for range in [single, window] {
            let daily = WeatherQuery::tokyo(range, OutputMode::Console).params();
            assert!(daily.iter().any(|(k, v)| *k == "daily"
                && v == "weathercode,temperature_2m_max,temperature_2m_min,precipitation_sum,windspeed_10m_max"));
            assert!(!daily.iter().any(|(k, _)| *k == "hourly"));

            let hourly = WeatherQuery::tokyo(range, OutputMode::Csv).params();
            assert!(hourly.iter().any(|(k, v)| *k == "hourly"
                && v == "temperature_2m,precipitation,windspeed_10m,weathercode"));
            assert!(!hourly.iter().any(|(k, _)| *k == "daily"));
        }
    }

    #[test]
    fn params_carry_range_and_location() {
        let range = DateRange::resolve(date(2024, 6, 15), None).unwrap();
        let params = WeatherQuery::tokyo(range, OutputMode::Console).params();

        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(get("start_date"), "2024-06-02");
        assert_eq!(get("end_date"), "2024-06-15");
        assert_eq!(get("timezone"), "Asia/Tokyo");
        assert_eq!(get("latitude"), "35.681236");
        assert_eq!(get("longitude"), "139.767125");
    }
}
