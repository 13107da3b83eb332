mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(
    name = "dockwright",
    about = "Generate a Dockerfile, then build and run the image"
)]
#[command(version)]
struct Cli {
    /// Enable debug logging for dockwright
    #[arg(long, global = true)]
    debug: bool,
    /// Directory containing dockwright.toml
    #[arg(long, global = true, default_value = ".")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and run the hello-world image
    HelloWorld(ExampleArgs),
    /// Build and run the whalesay tutorial image
    Whalesay(ExampleArgs),
}

#[derive(Args)]
struct ExampleArgs {
    /// Tag for the built image
    #[arg(long)]
    tag: Option<String>,
    /// Only write the Dockerfile; skip build and run
    #[arg(long)]
    dockerfile_only: bool,
}

impl ExampleArgs {
    fn into_example(self, config_dir: PathBuf) -> commands::Example {
        commands::Example {
            config_dir,
            tag: self.tag,
            dockerfile_only: self.dockerfile_only,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        tracing_subscriber::EnvFilter::new(
            "info,dockwright=debug,dockwright_core=debug,dockwright_build=debug,dockwright_engine=debug",
        )
    } else {
        tracing_subscriber::EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::HelloWorld(args) => {
            commands::hello_world(args.into_example(cli.config)).await?
        }
        Commands::Whalesay(args) => commands::whalesay(args.into_example(cli.config)).await?,
    }

    Ok(())
}
