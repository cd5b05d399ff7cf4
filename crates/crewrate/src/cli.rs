//! Clap CLI definitions for the `crewrate` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// crewrate -- hourly billing rates for service crews.
///
/// Works out what a plumbing, septic, or property-management business has to
/// charge per billable hour to cover crew wages, office staff, and overhead
/// at a target margin, and prices job estimates from the result.
#[derive(Parser, Debug)]
#[command(
    name = "crewrate",
    about = "Hourly billing rates and job estimates for service crews",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Project directory (default: auto-discover .crewrate/, or $CREWRATE_DIR).
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a crewrate project in the current directory.
    Init(InitArgs),

    /// Compute the recommended hourly rate.
    #[command(alias = "rate")]
    Calc(CalcArgs),

    /// Show how the rate moves when one input changes.
    Compare(CompareArgs),

    /// Inspect and delete recorded rates.
    Rates(RatesArgs),

    /// Price a job estimate at the recorded rate.
    Estimate(EstimateArgs),

    /// Manage configuration.
    Config(ConfigArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config.yaml with defaults.
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Calc / Compare
// ---------------------------------------------------------------------------

/// Inputs shared by `calc` and `compare`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioArgs {
    /// Scenario file (.json, .toml, .yaml). Defaults to the saved inputs.
    pub scenario: Option<PathBuf>,

    /// Service type (plumbing, septic, property-management, or any name).
    #[arg(short = 's', long)]
    pub service: Option<String>,

    /// Desired profit margin, in percent.
    #[arg(short = 'm', long)]
    pub margin: Option<f64>,

    /// Non-billable share of paid time, in percent.
    #[arg(short = 'w', long, conflicts_with = "billable_hours")]
    pub wastage: Option<f64>,

    /// Paid hours in a working day.
    #[arg(long)]
    pub work_hours: Option<f64>,

    /// Billable hours in a working day; sets wastage from the work day.
    #[arg(long)]
    pub billable_hours: Option<f64>,

    /// Number of crews the business runs.
    #[arg(long)]
    pub crews: Option<u32>,

    /// Monthly billable hours per crew.
    #[arg(long)]
    pub monthly_hours: Option<f64>,

    /// Pay crews a commission instead of an hourly wage.
    #[arg(long, conflicts_with = "hourly")]
    pub commission: bool,

    /// Pay crews their hourly wage.
    #[arg(long)]
    pub hourly: bool,
}

#[derive(Args, Debug)]
pub struct CalcArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Do not save the inputs or record the rate.
    #[arg(long)]
    pub no_save: bool,

    /// Also print the standard comparison tables.
    #[arg(long)]
    pub compare: bool,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Vary only this input (margin, overhead, commission, wastage, crew-count).
    #[arg(long, requires = "values")]
    pub vary: Option<String>,

    /// Values to try for --vary, comma separated.
    #[arg(long, value_delimiter = ',', requires = "vary")]
    pub values: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct RatesArgs {
    #[command(subcommand)]
    pub command: RatesCommands,
}

#[derive(Subcommand, Debug)]
pub enum RatesCommands {
    /// List every recorded rate.
    #[command(alias = "ls")]
    List,

    /// Show the recorded rate for a service or crew.
    Show(RateKeyArgs),

    /// Delete the recorded rate for a service or crew.
    #[command(alias = "rm")]
    Delete(RateKeyArgs),
}

#[derive(Args, Debug)]
pub struct RateKeyArgs {
    /// Service type.
    pub service: String,

    /// Crew name or slug.
    #[arg(long)]
    pub crew: Option<String>,
}

// ---------------------------------------------------------------------------
// Estimate
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Estimate file (.json, .toml, .yaml).
    pub file: PathBuf,

    /// Service whose rate prices the labor (default: the file's service).
    #[arg(short = 's', long)]
    pub service: Option<String>,

    /// Crew whose rate prices the labor (default: the file's crew).
    #[arg(long)]
    pub crew: Option<String>,

    /// Bill labor at this hourly rate instead of the recorded one.
    #[arg(long)]
    pub rate: Option<f64>,

    /// Markup for lines without their own, in percent.
    #[arg(long)]
    pub markup: Option<f64>,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show every setting with its effective value.
    #[command(alias = "list")]
    Show,

    /// Print one setting.
    Get(ConfigGetArgs),

    /// Change a setting in .crewrate/config.yaml.
    Set(ConfigSetArgs),
}

#[derive(Args, Debug)]
pub struct ConfigGetArgs {
    pub key: String,
}

#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    pub key: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn calc_flags_parse() {
        let cli = Cli::try_parse_from([
            "crewrate",
            "calc",
            "plan.toml",
            "--service",
            "septic",
            "--margin",
            "35",
            "--work-hours",
            "9",
            "--billable-hours",
            "6",
            "--no-save",
        ])
        .unwrap();
        let Some(Commands::Calc(args)) = cli.command else {
            panic!("expected calc");
        };
        assert_eq!(args.scenario.scenario, Some(PathBuf::from("plan.toml")));
        assert_eq!(args.scenario.service.as_deref(), Some("septic"));
        assert_eq!(args.scenario.margin, Some(35.0));
        assert_eq!(args.scenario.billable_hours, Some(6.0));
        assert!(args.no_save);
    }

    #[test]
    fn wastage_conflicts_with_billable_hours() {
        let err = Cli::try_parse_from([
            "crewrate",
            "calc",
            "--wastage",
            "20",
            "--billable-hours",
            "6",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn compare_values_are_comma_separated() {
        let cli =
            Cli::try_parse_from(["crewrate", "compare", "--vary", "margin", "--values", "20,25,40"])
                .unwrap();
        let Some(Commands::Compare(args)) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.values, vec![20.0, 25.0, 40.0]);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["crewrate", "rates", "list", "--json", "-q"]).unwrap();
        assert!(cli.global.json);
        assert!(cli.global.quiet);
    }
}
