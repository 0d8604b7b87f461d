mod report;
mod session;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use diet_core::*;
use session::Session;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dietlog")]
#[command(about = "Daily calorie target and food log tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory (history is stored here)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Food dataset CSV to load
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Profile fields; any omitted field falls back to the `[profile]` config section
#[derive(Args, Clone, Default)]
struct ProfileArgs {
    /// Age in years (10-100)
    #[arg(long)]
    age: Option<u32>,

    /// male or female
    #[arg(long)]
    gender: Option<String>,

    /// Weight in kg (30-200)
    #[arg(long)]
    weight: Option<f64>,

    /// Height in cm (120-250)
    #[arg(long)]
    height: Option<f64>,

    /// sedentary, light, moderate or active
    #[arg(long)]
    activity: Option<String>,

    /// weight-loss, maintenance or muscle-gain
    #[arg(long)]
    goal: Option<String>,
}

impl ProfileArgs {
    fn to_overrides(&self) -> Result<ProfileConfig> {
        Ok(ProfileConfig {
            age: self.age,
            gender: self.gender.as_deref().map(|s| s.parse::<Gender>()).transpose()?,
            weight_kg: self.weight,
            height_cm: self.height,
            activity: self.activity.as_deref().map(|s| s.parse::<ActivityLevel>()).transpose()?,
            goal: self.goal.as_deref().map(|s| s.parse::<Goal>()).transpose()?,
        })
    }

    /// Stored profile with command-line fields applied on top
    fn resolve(&self, config: &Config) -> Result<ProfileConfig> {
        let stored = config.profile.clone().unwrap_or_default();
        Ok(stored.merged_with(&self.to_overrides()?))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute BMI and its category from weight and height
    Bmi {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Compute BMR, TDEE and the goal-adjusted daily calorie target
    Target {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// List dishes in the food dataset
    Dishes {
        /// Only show dishes whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show recorded days
    History {
        /// Print records as JSON
        #[arg(long)]
        json: bool,

        /// Only show days on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
    },

    /// Log food interactively against today's target (default)
    Session {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Name recorded in history rows
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Interactive output goes to stdout; keep logs quiet unless asked
    if cli.verbose {
        diet_core::logging::init_with_level("debug");
    } else {
        diet_core::logging::init_with_level("warn");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    if let Some(dataset) = cli.dataset {
        config.data.dataset_path = Some(dataset);
    }

    match cli.command {
        Some(Commands::Bmi { profile }) => cmd_bmi(&config, &profile),
        Some(Commands::Target { profile }) => cmd_target(&config, &profile),
        Some(Commands::Dishes { filter }) => cmd_dishes(&config, filter),
        Some(Commands::History { json, since }) => cmd_history(&config, json, since),
        Some(Commands::Session { profile, name }) => cmd_session(&config, &profile, name),
        None => {
            // Default to "session" command
            cmd_session(&config, &ProfileArgs::default(), None)
        }
    }
}

fn cmd_bmi(config: &Config, args: &ProfileArgs) -> Result<()> {
    let profile = args.resolve(config)?;
    let (Some(weight), Some(height)) = (profile.weight_kg, profile.height_cm) else {
        return Err(Error::Config(
            "BMI needs --weight and --height (or weight_kg/height_cm in [profile])".into(),
        ));
    };

    let bmi = bmi_report(weight, height)?;
    report::print_bmi(&mut io::stdout().lock(), &bmi)
}

fn cmd_target(config: &Config, args: &ProfileArgs) -> Result<()> {
    let profile = args.resolve(config)?.to_profile()?;
    let bmi = bmi_report(profile.weight_kg, profile.height_cm)?;
    let target = calorie_target(&profile)?;

    let mut out = io::stdout().lock();
    report::print_bmi(&mut out, &bmi)?;
    writeln!(out)?;
    report::print_target(&mut out, &target)?;
    Ok(())
}

fn cmd_dishes(config: &Config, filter: Option<String>) -> Result<()> {
    let catalog = FoodCatalog::load_from(&config.dataset_path())?;
    let names = match filter.as_deref() {
        Some(fragment) => catalog.search(fragment),
        None => catalog.dish_names(),
    };

    let mut out = io::stdout().lock();
    for name in &names {
        writeln!(out, "{}", name)?;
    }
    if names.is_empty() {
        writeln!(out, "No matching dishes.")?;
    }
    Ok(())
}

fn cmd_history(config: &Config, json: bool, since: Option<String>) -> Result<()> {
    let store = HistoryStore::new(config.history_path());
    let mut records = store.read_history()?;

    if let Some(since) = since {
        let cutoff = NaiveDate::parse_from_str(&since, "%Y-%m-%d").map_err(|e| {
            Error::InvalidInput(format!("--since {:?} is not a YYYY-MM-DD date: {}", since, e))
        })?;
        records.retain(|r| r.date >= cutoff);
    }

    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
        return Ok(());
    }
    report::print_history(&mut out, &records)
}

fn cmd_session(config: &Config, args: &ProfileArgs, name: Option<String>) -> Result<()> {
    let profile = args.resolve(config)?.to_profile()?;
    let target = calorie_target(&profile)?;

    // A missing or unusable dataset stops the session before it starts
    let catalog = FoodCatalog::load_from(&config.dataset_path())?;

    let store = HistoryStore::new(config.history_path());
    let user_name = name.unwrap_or_else(|| config.user.name.clone());

    let mut out = io::stdout().lock();
    report::print_bmi(&mut out, &bmi_report(profile.weight_kg, profile.height_cm)?)?;
    writeln!(out)?;

    let mut session = Session::new(&catalog, store, target, user_name);
    session.run(io::stdin().lock(), &mut out)
}
