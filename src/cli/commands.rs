use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::config::FrostConfig;
use crate::error::{ProcessingError, Result};
use crate::presenter::{DashboardView, DataStore, ExploreSession, FrostQuery};
use crate::processors::Preprocessor;
use crate::utils::progress::ProgressReporter;
use crate::utils::MonthDay;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut config = FrostConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Preprocess { cutoff_year } => {
            if let Some(year) = cutoff_year {
                config = config.with_cutoff_year(year);
            }

            println!("Starting data pre-processing...");
            println!("Data directory: {}", config.paths.data_dir.display());

            let progress = ProgressReporter::new_spinner("Reading raw inputs...", cli.quiet);
            let report = Preprocessor::new(config).run(Some(&progress))?;
            progress.finish_with_message("Derived tables written");

            println!("\n{}", report.summary());
            println!(
                "✅ Done! Created '{}' and '{}'.",
                file_name(&report.city_table),
                file_name(&report.climate_table)
            );
        }

        Commands::Cities { search } => {
            let store = DataStore::load(&config.paths)?;
            let filter = search.map(|s| s.to_lowercase());

            for name in store.city_names() {
                let keep = filter
                    .as_deref()
                    .map_or(true, |f| name.to_lowercase().contains(f));
                if keep {
                    println!("{}", name);
                }
            }
        }

        Commands::Report {
            city,
            start,
            end,
            format,
        } => {
            let store = DataStore::load(&config.paths)?;
            let (default_start, default_end) = config.presenter.default_period()?;

            let city = match city {
                Some(city) => city,
                None => store
                    .default_city(&config.presenter.default_city)
                    .map(str::to_string)
                    .ok_or_else(|| ProcessingError::CityNotFound {
                        name: config.presenter.default_city.clone(),
                    })?,
            };
            let start = parse_day_or(start.as_deref(), default_start)?;
            let end = parse_day_or(end.as_deref(), default_end)?;

            let query = FrostQuery::new(city, start, end);
            info!(city = %query.city, period = %query.period_label(), "Building report");
            let view = DashboardView::build(&store, &query)?;

            match format {
                OutputFormat::Text => println!("{}", view.render_text()),
                OutputFormat::Json => println!("{}", view.to_json()?),
            }
        }

        Commands::Explore { format } => {
            let store = DataStore::load(&config.paths)?;
            let mut session = ExploreSession::new(store, config.presenter)
                .with_json(format == OutputFormat::Json);

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            session.run(stdin.lock(), stdout.lock())?;
        }
    }

    Ok(())
}

fn parse_day_or(value: Option<&str>, default: MonthDay) -> Result<MonthDay> {
    value.map_or(Ok(default), str::parse)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Logs go to stderr (and optionally a file) so stdout stays clean for reports
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_directive = if verbose {
        "info,frost_processor=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let file_layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(File::create(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| ProcessingError::InvalidConfig(format!("logging setup failed: {}", e)))
}
