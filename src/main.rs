use clap::CommandFactory;
use clap::Parser;
use cloudtrack_init::init;
use cloudtrack_weather::aggregate::Aggregator;
use cloudtrack_weather::config::AggregatorConfig;
use cloudtrack_weather::config::WeatherConfig;
use cloudtrack_weather::config::parse_concurrency;
use cloudtrack_weather::config::seconds;
use cloudtrack_weather::display::format_history;
use cloudtrack_weather::display::format_report;
use cloudtrack_weather::fetch::WttrClient;
use cloudtrack_weather::history::HistoryStore;
use cloudtrack_weather::history::SHOW_LIMIT;
use cloudtrack_weather::query::Query;
use tracing::warn;

/// Look up current weather for one or more cities at once.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Cities to look up
    #[arg(value_name = "CITY")]
    cities: Vec<String>,

    /// Show recent searches instead of fetching
    #[arg(long, conflicts_with = "cities")]
    history: bool,

    /// Maximum lookups in flight at once
    #[arg(long, value_parser = parse_concurrency)]
    concurrency: Option<usize>,

    /// Per-lookup timeout in seconds, 0 to disable
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Overall deadline in seconds, 0 to disable
    #[arg(long, value_name = "SECS")]
    deadline: Option<u64>,
}

impl Cli {
    /// Layer the command-line bounds over those read from the environment.
    fn apply(&self, config: &mut AggregatorConfig) {
        if let Some(x) = self.concurrency {
            config.max_concurrency = x;
        }
        if let Some(x) = self.timeout {
            config.request_timeout = seconds(x);
        }
        if let Some(x) = self.deadline {
            config.deadline = seconds(x);
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init()?;

    let cli = Cli::parse();
    let mut config = WeatherConfig::from_env()?;
    cli.apply(&mut config.aggregator);
    let store = HistoryStore::new(&config.history_file);

    if cli.history {
        match store.show(SHOW_LIMIT).await {
            Some(entries) => print!("{}", format_history(&entries)),
            None => println!("No search history found."),
        }
        return Ok(());
    }

    if cli.cities.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let queries: Vec<Query> = cli.cities.into_iter().map(Query::from).collect();
    let total = queries.len();
    let aggregator = Aggregator::new(WttrClient::new(&config.base_url)?, config.aggregator);

    println!("Fetching weather for {} location(s)...", total);
    let reports = aggregator.aggregate(queries).await;
    for report in &reports {
        print!("{}", format_report(report));
    }
    println!("\nFetched {} of {} location(s).", reports.len(), total);

    if !reports.is_empty() {
        if let Err(e) = store.append(&reports).await {
            warn!("Could not save history: {:?}", e);
            eprintln!(
                "Warning: could not save search history to {}: {}",
                store.path().display(),
                e
            );
        }
    }

    Ok(())
}
