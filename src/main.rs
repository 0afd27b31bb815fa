use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ini::{Ini, Kind};

#[derive(Parser)]
#[command(name = "ini")]
#[command(about = "Read typed values from INI configuration files")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Read a string value
    ini get config.ini Section1 MyStringVariable

    # Read an integer value
    ini get config.ini Section1 MyIntVariable --type int

    # List sections, then the keys of one of them
    ini sections config.ini
    ini keys config.ini Section1
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value of a key
    Get {
        /// Path to the INI file
        file: PathBuf,
        section: String,
        key: String,
        /// Type to read the value as (string, int)
        #[arg(short = 't', long = "type", default_value = "string")]
        kind: String,
    },
    /// List the sections of a file
    Sections {
        /// Path to the INI file
        file: PathBuf,
    },
    /// List the keys of a section
    Keys {
        /// Path to the INI file
        file: PathBuf,
        section: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ini=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Get {
            file,
            section,
            key,
            kind,
        } => {
            let kind = kind.parse::<Kind>()?;
            let ini = load(&file)?;
            let value = ini
                .get(&section, &key, kind)
                .with_context(|| format!("failed to read [{section}] {key} as {kind}"))?;
            println!("{value}");
        }
        Commands::Sections { file } => {
            for section in load(&file)?.sections() {
                println!("[{}]", section.name());
            }
        }
        Commands::Keys { file, section } => {
            let ini = load(&file)?;
            let section = ini
                .section(&section)
                .ok_or_else(|| ini::Error::SectionNotFound { section })?;
            for key in section.keys() {
                println!("{key}");
            }
        }
    }

    Ok(())
}

fn load(path: &Path) -> anyhow::Result<Ini> {
    Ini::load(path).with_context(|| format!("failed to load {}", path.display()))
}
