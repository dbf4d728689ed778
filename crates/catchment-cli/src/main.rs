mod outlets;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "catchment-cli")]
#[command(about = "Outlet catchment map command line interface")]
struct Cli {
    /// Call the outlet backend directly instead of going through the site proxy
    #[arg(long, global = true)]
    direct: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load outlets and list every pair whose catchments overlap
    Overlaps,
    /// Run a search the way the map's search box does
    Search {
        /// Search input, e.g. `how many outlets in Cheras`
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show the full record of one outlet
    Outlet {
        /// Outlet ID
        id: i64,
    },
    /// Load outlets and print the drawn map scene as JSON
    Scene,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = catchment_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("catchment-cli ready; see --help for commands");
        return Ok(());
    };

    let client = outlets::build_client(&config, cli.direct)?;
    match command {
        Commands::Overlaps => outlets::run_overlaps(client).await,
        Commands::Search { query } => outlets::run_search(client, &query.join(" ")).await,
        Commands::Outlet { id } => outlets::run_outlet(&client, id).await,
        Commands::Scene => outlets::run_scene(client).await,
    }
}
