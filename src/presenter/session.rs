use crate::config::PresenterConfig;
use crate::error::Result;
use crate::presenter::{DashboardView, DataStore, FrostQuery};
use crate::utils::MonthDay;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const HELP: &str = "Commands:
  <city>[; <start>[; <end>]]   show the frost report (dates as MM-DD)
  cities [text]                list cities, optionally filtered
  reload                       re-read the derived tables
  help                         show this message
  quit                         leave the session";

/// Line-oriented presenter session over a single loaded store.
///
/// Every query is recomputed from the store; the tables themselves are only
/// re-read on `reload`.
pub struct ExploreSession {
    store: DataStore,
    defaults: PresenterConfig,
    json: bool,
}

impl ExploreSession {
    pub fn new(store: DataStore, defaults: PresenterConfig) -> Self {
        Self {
            store,
            defaults,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(
            output,
            "{} cities loaded at {}. Type 'help' for commands.",
            self.store.city_names().len(),
            self.store.loaded_at().format("%H:%M:%S")
        )?;

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match line {
                "quit" | "exit" => break,
                "help" => writeln!(output, "{}", HELP)?,
                "reload" => match self.store.reload() {
                    Ok(()) => writeln!(output, "Reloaded {} cities", self.store.cities().len())?,
                    Err(e) => {
                        warn!("Reload failed: {}", e);
                        writeln!(output, "Reload failed, keeping previous data: {}", e)?
                    }
                },
                _ if line == "cities" || line.starts_with("cities ") => {
                    let filter = line["cities".len()..].trim().to_lowercase();
                    for name in self.store.city_names() {
                        if filter.is_empty() || name.to_lowercase().contains(&filter) {
                            writeln!(output, "{}", name)?;
                        }
                    }
                }
                _ => match self.answer(line) {
                    Ok(rendered) => writeln!(output, "{}", rendered)?,
                    Err(e) => writeln!(output, "Error: {}", e)?,
                },
            }
            output.flush()?;
        }

        Ok(())
    }

    /// Parse `<city>; <start>; <end>` and render the resulting view
    fn answer(&self, line: &str) -> Result<String> {
        let query = self.parse_query(line)?;
        debug!(?query, "Answering query");

        let view = DashboardView::build(&self.store, &query)?;
        if self.json {
            view.to_json()
        } else {
            Ok(view.render_text())
        }
    }

    fn parse_query(&self, line: &str) -> Result<FrostQuery> {
        let (default_start, default_end) = self.defaults.default_period()?;
        let mut parts = line.split(';').map(str::trim);

        let city = parts.next().unwrap_or_default();
        let start = parse_or(parts.next(), default_start)?;
        let end = parse_or(parts.next(), default_end)?;

        Ok(FrostQuery::new(city, start, end))
    }
}

fn parse_or(value: Option<&str>, default: MonthDay) -> Result<MonthDay> {
    match value {
        Some(v) if !v.is_empty() => v.parse(),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CityRecord, ClimateDay, DepartmentCode};

    fn session() -> ExploreSession {
        let dep = DepartmentCode::new("01");
        let store = DataStore::from_tables(
            vec![
                CityRecord::new("Belley".to_string(), dep.clone(), "Ain".to_string(), 45.76, 5.69),
                CityRecord::new("Bourg-en-Bresse".to_string(), dep.clone(), "Ain".to_string(), 46.2, 5.22),
            ],
            vec![
                ClimateDay::new(dep.clone(), 1, 1, 0.5, Some(-1.0)).unwrap(),
                ClimateDay::new(dep, 3, 1, 0.3, Some(2.0)).unwrap(),
            ],
        );
        ExploreSession::new(store, PresenterConfig::default())
    }

    fn run(session: &mut ExploreSession, input: &str) -> String {
        let mut output = Vec::new();
        session.run(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_query_with_default_period() {
        let output = run(&mut session(), "Belley\nquit\n");

        assert!(output.contains("Frost Risk: Belley"));
        assert!(output.contains("Analysis Period: 01 Jan - 30 Apr"));
        assert!(output.contains("Avg Frost Days : 0.8 days"));
    }

    #[test]
    fn test_query_with_explicit_period() {
        let output = run(&mut session(), "Belley; 02-01; 2024-03-01\n");

        assert!(output.contains("Avg Frost Days : 0.3 days"));
        assert!(output.contains("Avg Min Temp   : 2.0 °C"));
    }

    #[test]
    fn test_errors_do_not_end_the_session() {
        let output = run(&mut session(), "Atlantis\nBelley; 13-45\ncities bourg\n");

        assert!(output.contains("Error: City 'Atlantis' not found"));
        assert!(output.contains("Error: Invalid data format"));
        assert!(output.trim_end().ends_with("Bourg-en-Bresse"));
    }

    #[test]
    fn test_failed_reload_keeps_data() {
        let mut session = session();
        let output = run(&mut session, "reload\n");

        assert!(output.contains("Reload failed, keeping previous data"));
        assert_eq!(session.store().cities().len(), 2);
    }

    #[test]
    fn test_json_output() {
        let mut session = session().with_json(true);
        let output = run(&mut session, "Belley; 01-01; 01-01\n");

        assert!(output.contains("\"expected_frost_days\": 0.5"));
    }
}
