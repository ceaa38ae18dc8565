use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spdlog::{error, info, warn};

use monty_site::logger::configure_logger;
use monty_site::server::server_run;
use monty_site::site_build::build_site;

use crate::config::{generate_cfg, open_config};

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "monty-site.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serves the blog pages and the RSS feed
    Serve,
    /// Renders the site into the output directory
    Build,
    /// Writes a sample configuration file
    Init,
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    if let Command::Init = args.command {
        generate_cfg(&config_path)?;
        return Ok(());
    }

    let config = open_config(config_path)?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match args.command {
        Command::Serve => {
            info!("Starting monty-site =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
            info!("Listening on {}:{}", config.server.address, config.server.port);
            server_run(config).await?;
        }
        Command::Build => {
            if let Err(err) = build_site(&config) {
                error!("Build failed: {:#}", err);
                return Err(err);
            }
        }
        Command::Init => {}
    }

    Ok(())
}
