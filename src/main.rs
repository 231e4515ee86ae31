use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use datemate_analytics::cache::SnapshotCache;
use datemate_analytics::config::{
    GeneratorConfig, DEFAULT_BASE_USERS, DEFAULT_GROWTH_MEAN, DEFAULT_GROWTH_STD_DEV,
    DEFAULT_WINDOW_DAYS,
};
use datemate_analytics::export::{self, ExportFormat};
use datemate_analytics::filters::{AgeRange, DashboardFilters, DateRange, Location, Segment};
use datemate_analytics::logging::{self, LoggingConfig};
use datemate_analytics::report;

#[derive(Parser)]
#[command(name = "datemate-dashboard")]
#[command(about = "Synthetic analytics dashboard for the DateMate dating app", long_about = None)]
struct Cli {
    #[command(flatten)]
    generator: GeneratorArgs,
    #[command(flatten)]
    filters: FilterArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GeneratorArgs {
    /// Seed for reproducible data; omit for a fresh sample each run
    #[arg(long, global = true, env = "DATEMATE_SEED")]
    seed: Option<u64>,
    #[arg(long, global = true, env = "DATEMATE_WINDOW_DAYS", default_value_t = DEFAULT_WINDOW_DAYS)]
    window_days: u32,
    #[arg(long, global = true, env = "DATEMATE_BASE_USERS", default_value_t = DEFAULT_BASE_USERS)]
    base_users: f64,
    #[arg(long, global = true, env = "DATEMATE_GROWTH_MEAN", default_value_t = DEFAULT_GROWTH_MEAN)]
    growth_mean: f64,
    #[arg(long, global = true, env = "DATEMATE_GROWTH_STD_DEV", default_value_t = DEFAULT_GROWTH_STD_DEV)]
    growth_std_dev: f64,
    /// Floor daily growth at zero so total users never dip
    #[arg(long, global = true)]
    clamp_negative_growth: bool,
}

impl GeneratorArgs {
    fn into_config(self) -> GeneratorConfig {
        GeneratorConfig {
            window_days: self.window_days,
            base_users: self.base_users,
            growth_mean: self.growth_mean,
            growth_std_dev: self.growth_std_dev,
            clamp_negative_growth: self.clamp_negative_growth,
            seed: self.seed,
            ..Default::default()
        }
    }
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long, global = true, value_enum, default_value_t = DateRange::Last90Days)]
    date_range: DateRange,
    #[arg(long, global = true, value_enum, value_delimiter = ',', default_value = "all-users")]
    segment: Vec<Segment>,
    #[arg(long, global = true, value_enum, value_delimiter = ',', default_value = "global")]
    location: Vec<Location>,
    #[arg(long, global = true, default_value_t = 18)]
    age_min: u8,
    #[arg(long, global = true, default_value_t = 65)]
    age_max: u8,
}

impl FilterArgs {
    fn into_filters(self) -> anyhow::Result<DashboardFilters> {
        Ok(DashboardFilters {
            date_range: self.date_range,
            segments: self.segment,
            locations: self.location,
            age_range: AgeRange::new(self.age_min, self.age_max)?,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the headline summary cards
    Summary,
    /// Generate a markdown dashboard report
    Report {
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
    /// Export the generated data
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(LoggingConfig::from_env()).context("failed to initialize logging")?;

    let config = cli.generator.into_config();
    config.validate().context("invalid generator configuration")?;
    let filters = cli.filters.into_filters().context("invalid filters")?;

    let cache = SnapshotCache::new(config);
    tracing::info!(
        window_days = cache.config().window_days,
        seed = ?cache.config().seed,
        "starting dashboard"
    );
    let snapshot = cache.get().context("failed to generate mock metrics")?;
    let daily = filters.apply(&snapshot.daily);

    match cli.command {
        Commands::Summary => {
            let cards = report::summary_cards(daily);
            if cards.is_empty() {
                println!("No data in the selected window.");
                return Ok(());
            }

            println!("{} ({}):", report::TITLE, filters.date_range.label());
            for card in cards {
                println!("- {}: {}", card.label, card.value);
            }
        }
        Commands::Report { out } => {
            let report = report::build_report(&snapshot, &filters, chrono::Utc::now());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            tracing::info!(path = %out.display(), "report written");
            println!("Report written to {}.", out.display());
        }
        Commands::Export { format, out } => match out {
            Some(path) => {
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                export::export(std::io::BufWriter::new(file), format, &snapshot, daily)?;
                tracing::info!(path = %path.display(), ?format, "export written");
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                export::export(&mut handle, format, &snapshot, daily)?;
                handle.flush()?;
            }
        },
    }

    Ok(())
}
