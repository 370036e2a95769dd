//! ztprov - Cloudflare Zero Trust Access applications and DNS locations

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod resources;
mod schema;
mod secret;
mod state;

use cli::args::GlobalOptions;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder = if debug {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Debug);
        builder
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"))
    };
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);
    log::debug!("Running {:?}", cli.command);

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("ztprov version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Resources => cli::schema::resources(&opts),
        Commands::Schema { resource } => cli::schema::describe(&opts, &resource),
        Commands::Validate { resource, config } => {
            cli::resource::validate(&opts, &resource, &config.file)
        }
        Commands::Plan {
            resource,
            config,
            state,
        } => cli::resource::plan(&opts, &resource, &config.file, &state.state),
        Commands::Apply {
            resource,
            config,
            state,
        } => cli::resource::apply(&opts, &resource, &config.file, &state.state).await,
        Commands::Refresh { state } => cli::resource::refresh(&opts, &state.state).await,
        Commands::Destroy { state } => cli::resource::destroy(&opts, &state.state).await,
        Commands::Import {
            resource,
            id,
            state,
        } => cli::resource::import(&opts, &resource, &id, &state.state).await,
    }
}
