//! roster CLI - Student placement roster generator
//!
//! Command-line interface for expanding a placement period, assigning
//! student and supervisor roles per day, and exporting the colored roster.

mod input;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use roster_core::{
    assemble, expand, PlacementDetails, Renderer, RolePair, RosterConfig, RosterTable,
    MATCH_LABEL,
};
use roster_render::{ExcelRenderer, HtmlRenderer, TextRenderer, EXPORT_FILE_NAME};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "roster")]
#[command(author, version, about = "Student placement roster generator", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the day slots of a placement with their selection prompts
    Calendar {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Write a selections file with an empty entry for every day
    Template {
        #[command(flatten)]
        period: PeriodArgs,

        /// Role configuration (TOML)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the roster to stdout
    Show {
        #[command(flatten)]
        period: PeriodArgs,

        #[command(flatten)]
        roster: RosterArgs,

        #[command(flatten)]
        details: DetailsArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ShowFormat::Text)]
        format: ShowFormat,

        /// Paint role cells with ANSI colors (text format only)
        #[arg(long)]
        color: bool,
    },

    /// Export the roster as an Excel workbook
    Export {
        #[command(flatten)]
        period: PeriodArgs,

        #[command(flatten)]
        roster: RosterArgs,

        #[command(flatten)]
        details: DetailsArgs,

        /// Output file path
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,

        /// Replace the output file if it already exists
        #[arg(long)]
        force: bool,
    },

    /// List the role vocabulary and its colors
    Roles {
        /// Role configuration (TOML)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct PeriodArgs {
    /// First day of the placement (YYYY-MM-DD or DD/MM/YYYY, default today)
    #[arg(short, long, value_parser = input::start_date)]
    start: Option<NaiveDate>,

    /// Number of weeks
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=10))]
    weeks: u32,
}

impl PeriodArgs {
    fn start(&self) -> NaiveDate {
        self.start
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[derive(Args)]
struct RosterArgs {
    /// Role selections file (TOML, see `roster template`)
    #[arg(long, value_name = "FILE")]
    selections: Option<PathBuf>,

    /// Role pick for one day, overriding the selections file
    #[arg(long = "select", value_name = "ROW=STUDENT|SUPERVISOR", value_parser = input::selection)]
    select: Vec<(usize, RolePair)>,

    /// Role configuration (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct DetailsArgs {
    /// Student name
    #[arg(long, default_value = "")]
    student_name: String,

    /// Year group
    #[arg(long, default_value = "")]
    year_group: String,

    /// Student number
    #[arg(long, default_value = "")]
    student_number: String,

    /// Email address
    #[arg(long, default_value = "")]
    email: String,

    /// Practice educator/assessor name
    #[arg(long, default_value = "")]
    educator: String,

    /// Practice supervisor name (up to 3)
    #[arg(long = "supervisor", value_name = "NAME")]
    supervisors: Vec<String>,
}

impl DetailsArgs {
    fn build(&self) -> Result<PlacementDetails> {
        input::placement_details(
            &self.student_name,
            &self.year_group,
            &self.student_number,
            &self.email,
            &self.educator,
            &self.supervisors,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ShowFormat {
    Text,
    Html,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG takes precedence over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Some(Commands::Calendar { period }) => cmd_calendar(&period),
        Some(Commands::Template {
            period,
            config,
            output,
        }) => cmd_template(&period, config.as_deref(), output.as_deref()),
        Some(Commands::Show {
            period,
            roster,
            details,
            format,
            color,
        }) => cmd_show(&period, &roster, &details, format, color),
        Some(Commands::Export {
            period,
            roster,
            details,
            output,
            force,
        }) => cmd_export(&period, &roster, &details, &output, force),
        Some(Commands::Roles { config }) => cmd_roles(config.as_deref()),
        None => {
            println!("roster - Student placement roster generator");
            println!("Run with --help for usage information");
            Ok(())
        }
    }
}

fn cmd_calendar(period: &PeriodArgs) -> Result<()> {
    let calendar = expand(period.start(), period.weeks)?;
    for (row, day) in calendar.iter().enumerate() {
        println!("{row:>3}  {}", day.prompt("Student"));
        println!("     {}", day.prompt("Supervisor"));
    }
    Ok(())
}

fn cmd_template(period: &PeriodArgs, config: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let config = input::load_config(config)?;
    let calendar = expand(period.start(), period.weeks)?;
    let template = input::selections_template(&calendar, &config.roles);

    match output {
        Some(path) => {
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            fs::write(path, template)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Created: {}", path.display());
        }
        None => print!("{template}"),
    }
    Ok(())
}

/// Expand the calendar and assemble it with the current selections
fn build_roster(period: &PeriodArgs, args: &RosterArgs) -> Result<(RosterConfig, RosterTable)> {
    let config = input::load_config(args.config.as_deref())?;
    let calendar = expand(period.start(), period.weeks)?;
    let selections = input::load_selections(args.selections.as_deref(), &args.select, &config)?;
    Ok((config, assemble(&calendar, &selections)))
}

fn cmd_show(
    period: &PeriodArgs,
    args: &RosterArgs,
    details: &DetailsArgs,
    format: ShowFormat,
    color: bool,
) -> Result<()> {
    let (config, table) = build_roster(period, args)?;
    let details = details.build()?;

    let output = match format {
        ShowFormat::Text => TextRenderer::new()
            .colors(config.colors)
            .ansi(color)
            .render(&details, &table)?,
        ShowFormat::Html => HtmlRenderer::new()
            .colors(config.colors)
            .render(&details, &table)?,
        ShowFormat::Json => {
            let doc = serde_json::json!({
                "details": details,
                "summary": table.summary(),
                "rows": table,
            });
            serde_json::to_string_pretty(&doc)?
        }
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn cmd_export(
    period: &PeriodArgs,
    args: &RosterArgs,
    details: &DetailsArgs,
    output: &Path,
    force: bool,
) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists (use --force to replace it)", output.display());
    }

    let (config, table) = build_roster(period, args)?;
    let details = details.build()?;

    let bytes = ExcelRenderer::new()
        .colors(config.colors)
        .render(&details, &table)
        .context("export failed")?;
    fs::write(output, &bytes)
        .with_context(|| format!("export failed: could not write {}", output.display()))?;

    tracing::info!(path = %output.display(), bytes = bytes.len(), "exported roster");
    println!("Exported {} days to {}", table.len(), output.display());
    Ok(())
}

fn cmd_roles(config: Option<&Path>) -> Result<()> {
    let config = input::load_config(config)?;
    for role in &config.roles {
        let name = if role.is_empty() { "(none)" } else { role.as_str() };
        println!("{}  {name}", config.colors.color_of(role.as_str()));
    }
    println!("{}  {MATCH_LABEL}", config.colors.color_of(MATCH_LABEL));
    println!("{}  (other)", config.colors.fallback());
    Ok(())
}
