use chrono::Local;
use clap::Parser;

use tenki_core::output::{self, DEFAULT_CSV_COLUMNS};
use tenki_core::{Config, DateRange, OpenMeteoClient, OutputMode, WeatherProvider, WeatherQuery};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tenki", version, about = "Tokyo Station weather, console or CSV")]
pub struct Cli {
    /// Single day to report, YYYY-MM-DD; defaults to the trailing two weeks.
    pub date: Option<String>,

    /// Export hourly rows to a CSV file instead of printing daily summaries.
    #[arg(long)]
    pub csv: bool,

    /// Comma-separated subset of CSV columns (only meaningful with --csv).
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let provider = OpenMeteoClient::new();
        self.execute(&provider).await
    }

    async fn execute(&self, provider: &impl WeatherProvider) -> anyhow::Result<()> {
        let today = Local::now().date_naive();
        let range = DateRange::resolve(today, self.date.as_deref())?;
        let mode = if self.csv {
            OutputMode::Csv
        } else {
            OutputMode::Console
        };

        // Input validation happens before the network call.
        let columns = match (&self.columns, mode) {
            (Some(names), OutputMode::Csv) => output::parse_columns(names)?,
            _ => DEFAULT_CSV_COLUMNS.to_vec(),
        };

        let query = WeatherQuery::tokyo(range, mode);
        let response = provider.fetch(&query).await?;

        match mode {
            OutputMode::Console => {
                let records = response.daily_records()?;
                output::write_console(&output::format_console(&records))?;
            }
            OutputMode::Csv => {
                let records = response.hourly_records()?;
                let text = output::format_csv(&records, &columns)?;

                let config = Config::load()?;
                let base = config.output_base_dir()?;
                let destination = output::csv_destination(&base, &range);
                output::write_csv_file(&destination, &text)?;
                println!("CSV written to {}", destination.display());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_invocation() {
        let cli = Cli::try_parse_from(["tenki"]).unwrap();
        assert_eq!(cli.date, None);
        assert!(!cli.csv);
        assert!(cli.columns.is_none());
    }

    #[test]
    fn parses_date_and_csv_flag() {
        let cli = Cli::try_parse_from(["tenki", "2024-01-01", "--csv"]).unwrap();
        assert_eq!(cli.date.as_deref(), Some("2024-01-01"));
        assert!(cli.csv);
    }

    #[test]
    fn parses_comma_separated_columns() {
        let cli =
            Cli::try_parse_from(["tenki", "--csv", "--columns", "timestamp,temperature"]).unwrap();
        assert_eq!(
            cli.columns,
            Some(vec!["timestamp".to_string(), "temperature".to_string()])
        );
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["tenki", "--yaml"]).is_err());
    }
}
