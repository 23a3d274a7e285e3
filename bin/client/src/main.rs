//! Upload server client

mod api;
mod constants;
mod upload;

use api::ServerClient;
use clap::{Parser, Subcommand};
use constants::DEFAULT_SERVER_URL;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tempdrop-client")]
#[command(about = "Share files for 24 hours under a name and password")]
struct Cli {
    /// Server URL
    #[arg(short, long, global = true, default_value = DEFAULT_SERVER_URL)]
    server: String,
    /// Name the batch is stored under
    #[arg(short, long, global = true)]
    name: Option<String>,
    /// Password the batch is stored under
    #[arg(short, long, global = true)]
    password: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the name/password pair is still free
    Check,
    /// Upload every file of a directory as one batch
    Upload {
        /// Directory containing files
        #[arg(short, long)]
        dir: PathBuf,
    },
    /// List the files stored under the name/password pair
    List,
    /// Delete the batch stored under the name/password pair
    Delete,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let (Some(name), Some(password)) = (cli.name, cli.password) else {
        anyhow::bail!("Both --name and --password are required");
    };
    let client = ServerClient::new(&cli.server, &name, &password);

    match cli.command {
        Commands::Check => print_json(&client.check()?)?,
        Commands::Upload { dir } => {
            let files = upload::read_files_from_directory(&dir)?;
            log::info!("Found {} files to upload", files.len());
            print_json(&client.upload(files)?)?;
        }
        Commands::List => print_json(&client.list()?)?,
        Commands::Delete => print_json(&client.delete()?)?,
    }

    Ok(())
}
