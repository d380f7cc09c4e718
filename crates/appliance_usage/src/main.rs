use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use appliance_usage::Config;
use appliance_usage::Day;
use appliance_usage::Profile;
use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(about = "Energy usage and device savings from appliance state logs")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Minutes on during a single-day profile
    Usage { profile: PathBuf },

    /// Minutes switched off by the device during a single-day profile
    Savings { profile: PathBuf },

    /// Minutes on during one day of a month profile
    Day {
        profile: PathBuf,
        /// Day number, 1 to 365
        #[arg(allow_negative_numbers = true)]
        day: f64,
    },

    /// Usage and savings for a range of days of a month profile
    Report {
        profile: PathBuf,
        #[arg(long)]
        from: Option<i64>,
        #[arg(long)]
        to: Option<i64>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(config.logging.env_filter())
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &args.config {
        tracing::info!("Loaded config from: {}", path.display());
    }

    match args.command {
        Command::Usage { profile } => {
            let profile = load_profile(&profile)?;
            println!("{}", appliance_usage::usage(&profile)?);
        }
        Command::Savings { profile } => {
            let profile = load_profile(&profile)?;
            println!("{}", appliance_usage::savings(&profile)?);
        }
        Command::Day { profile, day } => {
            let day = Day::try_from(day)?;
            let profile = load_profile(&profile)?;
            println!("{}", appliance_usage::usage_for_day(&profile, day)?);
        }
        Command::Report { profile, from, to } => {
            let first = Day::new(from.or(config.report.first_day).unwrap_or(1))?;
            let last = Day::new(
                to.or(config.report.last_day)
                    .unwrap_or_else(|| i64::from(first.number())),
            )?;
            let profile = load_profile(&profile)?;
            tracing::info!("Reporting days {} to {}", first, last);
            for report in appliance_usage::month_report(&profile, first..=last)? {
                println!("{}", report);
            }
        }
    }

    Ok(())
}

/// Read a profile from a `.toml` or `.json` file.
fn load_profile(path: &Path) -> anyhow::Result<Profile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading profile {}", path.display()))?;

    let profile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Profile::from_toml_str(&contents)?,
        Some("json") => Profile::from_json_str(&contents)?,
        _ => bail!(
            "unsupported profile format for {}: expected .toml or .json",
            path.display()
        ),
    };

    tracing::debug!(
        "Loaded profile from {} ({} events, initial {})",
        path.display(),
        profile.events.len(),
        profile.initial
    );
    Ok(profile)
}
