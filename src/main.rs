use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use event_advisor_lib::{
    build_coordinator, config::AppConfig, logging, open_store, query, setup_catalog, Category,
    QueryCriteria, RecommendationRequest, TimeOfDay,
};

#[derive(Parser)]
#[command(name = "event-advisor")]
#[command(about = "Weather-aware event recommendations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the event catalog with the sample events
    Setup,
    /// Recommend events for a date
    Recommend {
        /// Event date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// City used for the weather lookup (defaults to the configured location)
        #[arg(long)]
        location: Option<String>,
        /// indoor or outdoor
        #[arg(long)]
        category: Option<Category>,
        /// morning, afternoon or evening
        #[arg(long)]
        time_of_day: Option<TimeOfDay>,
        /// Highest acceptable minimum ticket price
        #[arg(long)]
        max_price: Option<f64>,
        /// Print the rendered weather and event context without calling the LLM
        #[arg(long)]
        no_llm: bool,
    },
    /// List other dates on which an event runs
    Alternatives {
        #[arg(long)]
        name: String,
        #[arg(long)]
        date: NaiveDate,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Setup => {
            let count = setup_catalog(&config)?;
            info!(path = %config.database_path().display(), "catalog ready");
            println!("Event catalog rebuilt with {count} events.");
        }
        Commands::Recommend {
            date,
            location,
            category,
            time_of_day,
            max_price,
            no_llm,
        } => {
            if let Some(price) = max_price {
                anyhow::ensure!(price >= 0.0, "--max-price must not be negative");
            }
            let mut criteria = QueryCriteria::on(date);
            criteria.category = category;
            criteria.time_of_day = time_of_day;
            criteria.max_price = max_price;

            let request = RecommendationRequest {
                location: location.unwrap_or_else(|| config.default_location.clone()),
                criteria,
            };
            let text = match build_coordinator(&config) {
                Ok(coordinator) if no_llm => coordinator.respond_preview(&request),
                Ok(coordinator) => coordinator.respond(&request),
                Err(err) => format!("Error: {err:#}"),
            };
            println!("{text}");
        }
        Commands::Alternatives { name, date } => {
            let store = open_store(&config)?;
            let dates = query::alternative_dates(&store, &name, date);
            if dates.is_empty() {
                println!("No other dates found for {name}.");
            } else {
                for alt in dates {
                    println!("{alt}");
                }
            }
        }
    }

    Ok(())
}
