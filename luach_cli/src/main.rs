use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use luach_core::calendar;
use luach_core::config::OutputFormat;
use luach_core::*;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "luach")]
#[command(about = "Luni-solar calendar and study schedule calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the Israel festival calendar (overrides config)
    #[arg(long, global = true)]
    in_israel: bool,

    /// Print JSON instead of text (overrides config)
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a date between the civil and luni-solar calendars
    Convert {
        /// Civil date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "hebrew")]
        civil: Option<String>,

        /// Luni-solar date (YEAR-MONTH-DAY, months numbered from Nissan)
        #[arg(long)]
        hebrew: Option<String>,
    },

    /// Show the molad of a month
    Molad {
        year: i32,
        /// Month number (1 = Nissan .. 13 = Adar II)
        month: u8,
    },

    /// Describe a year: length, leap status, kviah and month lengths
    Year { year: i32 },

    /// Show what a schedule assigns to a date (default today)
    Limud {
        /// Schedule id (see `luach schedules`); defaults to the configured one
        schedule: Option<String>,

        /// Civil date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "hebrew")]
        civil: Option<String>,

        /// Luni-solar date (YEAR-MONTH-DAY)
        #[arg(long)]
        hebrew: Option<String>,
    },

    /// List the available schedules
    Schedules,

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Shared settings for one invocation
struct Context {
    config: Config,
    in_israel: bool,
    json: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    luach_core::logging::init();

    let cli = Cli::parse();

    if let Commands::Config {
        action: ConfigAction::Init { force },
    } = cli.command
    {
        return cmd_config_init(cli.config, force);
    }

    let config = load_config(cli.config.as_ref())?;
    let ctx = Context {
        in_israel: cli.in_israel || config.location.in_israel,
        json: cli.json || config.output.format == OutputFormat::Json,
        config,
    };

    match cli.command {
        Commands::Convert { civil, hebrew } => cmd_convert(&ctx, civil, hebrew),
        Commands::Molad { year, month } => cmd_molad(&ctx, year, month),
        Commands::Year { year } => cmd_year(&ctx, year),
        Commands::Limud {
            schedule,
            civil,
            hebrew,
        } => cmd_limud(&ctx, schedule, civil, hebrew),
        Commands::Schedules => cmd_schedules(&ctx),
        Commands::Config { .. } => cmd_config_show(&ctx),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => Config::load_from(path),
        Some(path) => {
            tracing::info!("No config file found at {:?}, using defaults", path);
            Ok(Config::default())
        }
        None => Config::load(),
    }
}

// ============================================================================
// Input parsing
// ============================================================================

fn parse_civil(value: &str) -> Result<JewishDate> {
    let civil = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| Error::InvalidDate(format!("{:?} is not YYYY-MM-DD: {}", value, e)))?;
    JewishDate::from_civil(civil)
}

fn parse_hebrew(value: &str) -> Result<JewishDate> {
    let invalid = || Error::InvalidDate(format!("{:?} is not YEAR-MONTH-DAY", value));
    let mut parts = value.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let year = year.trim().parse().map_err(|_| invalid())?;
    let month = month.trim().parse().map_err(|_| invalid())?;
    let day = day.trim().parse().map_err(|_| invalid())?;
    JewishDate::new(year, month, day)
}

fn resolve_date(civil: Option<String>, hebrew: Option<String>) -> Result<JewishDate> {
    match (civil, hebrew) {
        (Some(civil), _) => parse_civil(&civil),
        (None, Some(hebrew)) => parse_hebrew(&hebrew),
        (None, None) => JewishDate::today(),
    }
}

// ============================================================================
// Output
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    println!("{}", rendered);
    Ok(())
}

const WEEKDAYS: [&str; 7] = [
    "sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "shabbos",
];

fn weekday_name(day_of_week: u8) -> &'static str {
    WEEKDAYS
        .get(usize::from(day_of_week).wrapping_sub(1))
        .copied()
        .unwrap_or("?")
}

fn hebrew_label(date: &JewishDate) -> String {
    format!("{} {} {}", date.day(), date.month_name(), date.year())
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_convert(ctx: &Context, civil: Option<String>, hebrew: Option<String>) -> Result<()> {
    let date = resolve_date(civil, hebrew)?;
    if ctx.json {
        return print_json(&date);
    }

    println!("civil:  {} ({})", date.civil(), weekday_name(date.day_of_week()));
    println!("hebrew: {}", hebrew_label(&date));
    Ok(())
}

#[derive(Serialize)]
struct MoladReport {
    year: i32,
    month: u8,
    month_name: &'static str,
    date: JewishDate,
    hours: u8,
    minutes: u8,
    parts: u8,
}

fn cmd_molad(ctx: &Context, year: i32, month: u8) -> Result<()> {
    // validates that the month exists in this year
    let first = JewishDate::new(year, month, 1)?;
    let date = first.molad()?;
    let time = date
        .molad_time()
        .ok_or_else(|| Error::InvalidDate(format!("no molad time for {}-{}", year, month)))?;

    if ctx.json {
        return print_json(&MoladReport {
            year,
            month,
            month_name: first.month_name(),
            date,
            hours: time.hours(),
            minutes: time.minutes(),
            parts: time.parts(),
        });
    }

    println!(
        "molad {} {}: {} ({}, {}) at {}",
        first.month_name(),
        year,
        hebrew_label(&date),
        weekday_name(date.day_of_week()),
        date.civil(),
        time
    );
    Ok(())
}

#[derive(Serialize)]
struct MonthReport {
    month: u8,
    name: &'static str,
    days: u8,
}

#[derive(Serialize)]
struct YearReport {
    year: i32,
    leap: bool,
    days: i64,
    rosh_hashana: JewishDate,
    kviah: YearKviah,
    months: Vec<MonthReport>,
}

fn cmd_year(ctx: &Context, year: i32) -> Result<()> {
    let rosh_hashana = JewishDate::new(year, Month::Tishrei.number(), 1)?;
    let months = calendar::chronological_month_lengths(year)
        .into_iter()
        .map(|(month, days)| {
            Month::from_number(month).map(|m| MonthReport {
                month,
                name: m.name(),
                days,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let report = YearReport {
        year,
        leap: calendar::is_leap_year(year),
        days: calendar::days_in_year(year),
        rosh_hashana,
        kviah: calendar::year_kviah(year),
        months,
    };

    if ctx.json {
        return print_json(&report);
    }

    println!(
        "{}: {} days, {}",
        year,
        report.days,
        if report.leap { "leap year" } else { "common year" }
    );
    println!(
        "rosh hashana: {} ({})",
        report.rosh_hashana.civil(),
        weekday_name(report.rosh_hashana.day_of_week())
    );
    println!(
        "kviah: rosh hashana {}, {}, pesach {}",
        weekday_name(report.kviah.rosh_hashana),
        report.kviah.cheshvan_kislev,
        weekday_name(report.kviah.pesach)
    );
    for month in &report.months {
        println!("  {:<10} {}", month.name, month.days);
    }
    Ok(())
}

#[derive(Serialize)]
struct LimudReport {
    schedule: &'static str,
    date: JewishDate,
    description: Option<String>,
    start: Option<JewishDate>,
    end: Option<JewishDate>,
    iteration: Option<u32>,
    cycle_iteration: Option<u32>,
    cycle_start: Option<JewishDate>,
    cycle_end: Option<JewishDate>,
}

fn cmd_limud(
    ctx: &Context,
    schedule: Option<String>,
    civil: Option<String>,
    hebrew: Option<String>,
) -> Result<()> {
    let kind = match schedule {
        Some(id) => ScheduleKind::from_id(&id)?,
        None => ctx.config.default_schedule()?,
    };
    let date = resolve_date(civil, hebrew)?;
    let found = limud(kind.build(ctx.in_israel).as_ref(), &date)?;

    if ctx.json {
        return print_json(&LimudReport {
            schedule: kind.id(),
            date,
            description: found.as_ref().map(|l| l.description()),
            start: found.as_ref().map(|l| l.start),
            end: found.as_ref().map(|l| l.end),
            iteration: found.as_ref().map(|l| l.iteration),
            cycle_iteration: found.as_ref().and_then(|l| l.cycle_iteration()),
            cycle_start: found.as_ref().map(|l| l.cycle_start()),
            cycle_end: found.as_ref().map(|l| l.cycle_end()),
        });
    }

    match found {
        Some(found) => {
            let description = found.description();
            println!(
                "{} {}: {}",
                kind,
                date.civil(),
                if description.is_empty() { "-" } else { description.as_str() }
            );
            if found.start != found.end {
                println!("  from {} to {}", found.start.civil(), found.end.civil());
            }
        }
        None => println!("{} {}: nothing scheduled", kind, date.civil()),
    }
    Ok(())
}

#[derive(Serialize)]
struct ScheduleListing {
    id: &'static str,
    summary: &'static str,
    depends_on_location: bool,
}

fn cmd_schedules(ctx: &Context) -> Result<()> {
    let listings: Vec<ScheduleListing> = ScheduleKind::ALL
        .iter()
        .map(|kind| ScheduleListing {
            id: kind.id(),
            summary: kind.summary(),
            depends_on_location: kind.depends_on_location(),
        })
        .collect();

    if ctx.json {
        return print_json(&listings);
    }

    for listing in &listings {
        println!("{:<24} {}", listing.id, listing.summary);
    }
    Ok(())
}

fn cmd_config_show(ctx: &Context) -> Result<()> {
    if ctx.json {
        return print_json(&ctx.config);
    }
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}

fn cmd_config_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_config_path()?,
    };
    if path.exists() && !force {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to overwrite)", path.display()),
        )));
    }

    Config::default().save_to(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
