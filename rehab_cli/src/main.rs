use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rehab_core::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rehab")]
#[command(about = "Medication adherence and rehab exercise tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Track doses and exercises from commands on stdin (default)
    Session,

    /// Show the dashboard for the seeded schedule
    Status {
        /// Print the summary and items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    rehab_core::logging::init();

    let cli = Cli::parse();

    if let Some(Commands::InitConfig { force }) = cli.command {
        let path = cli.config.unwrap_or_else(Config::default_config_path);
        return cmd_init_config(path, force);
    }

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut tracker = Tracker::from_config(&config)?;

    match cli.command {
        Some(Commands::Status { json }) => cmd_status(&tracker, json),
        Some(Commands::Session) | None => cmd_session(&mut tracker),
        Some(Commands::InitConfig { .. }) => Ok(()),
    }
}

fn cmd_init_config(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(&path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn cmd_status(tracker: &Tracker, json: bool) -> Result<()> {
    if json {
        let report = serde_json::json!({
            "summary": tracker.summary(),
            "items": tracker.items(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_dashboard(tracker);
    }
    Ok(())
}

fn cmd_session(tracker: &mut Tracker) -> Result<()> {
    display_dashboard(tracker);
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        tracing::debug!("Session input: {:?}", line.trim());

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        if let SessionCommand::Quit = command {
            break;
        }

        if let Err(e) = run_command(tracker, command) {
            eprintln!("Error: {}", e);
        }
    }

    println!();
    println!("Session ended with {} points", tracker.total_points());
    Ok(())
}

enum SessionCommand {
    Take(String),
    Toggle(String),
    Pain(i64),
    Day(NaiveDate),
    Status,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
fn parse_command(line: &str) -> std::result::Result<Option<SessionCommand>, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!(
            "'{}' takes at most one argument. Type 'help' for usage.",
            verb
        ));
    }

    let command = match (verb.to_lowercase().as_str(), arg) {
        ("take", Some(id)) => SessionCommand::Take(id.to_string()),
        ("toggle", Some(id)) => SessionCommand::Toggle(id.to_string()),
        ("pain", Some(value)) => SessionCommand::Pain(
            value
                .parse()
                .map_err(|_| format!("Pain level must be a whole number, got '{}'", value))?,
        ),
        ("day", Some(date)) => SessionCommand::Day(
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| format!("Dates look like 2025-09-23, got '{}'", date))?,
        ),
        ("status", None) => SessionCommand::Status,
        ("status", Some(_)) => {
            return Err("'status' takes no arguments. Type 'help' for usage.".to_string());
        }
        ("help", _) => SessionCommand::Help,
        ("quit" | "exit", _) => SessionCommand::Quit,
        ("take" | "toggle" | "pain" | "day", None) => {
            return Err(format!("'{}' needs an argument. Type 'help' for usage.", verb));
        }
        _ => return Err(format!("Unknown command: {}. Type 'help' for usage.", line.trim())),
    };

    Ok(Some(command))
}

fn run_command(tracker: &mut Tracker, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Take(id) => {
            let delta = tracker.record_medication_taken(&id)?;
            let item = tracker.item(&id)?;
            match delta {
                Some(delta) => println!(
                    "✓ {} taken (+{} points, streak {})",
                    item.name(),
                    delta.points,
                    item.streak().unwrap_or(0)
                ),
                None => println!("{} already taken this period", item.name()),
            }
        }

        SessionCommand::Toggle(id) => {
            let outcome = tracker.toggle_exercise_completed(&id)?;
            let name = tracker.item(&id)?.name();
            match (outcome.completed, outcome.delta) {
                (true, Some(delta)) => println!("✓ {} done ({:+} points)", name, delta.points),
                (true, None) => println!("✓ {} done", name),
                (false, Some(delta)) => {
                    println!("{} marked not done ({:+} points)", name, delta.points)
                }
                (false, None) => println!("{} marked not done", name),
            }
        }

        SessionCommand::Pain(value) => {
            let level = tracker.set_pain_level(value);
            println!("Pain level: {}/10 ({})", level, tracker.pain().band());
        }

        SessionCommand::Day(date) => {
            tracker.begin_period(date)?;
            println!("Started period {}", date);
        }

        SessionCommand::Status => display_dashboard(tracker),

        SessionCommand::Help => display_help(),

        SessionCommand::Quit => {}
    }

    Ok(())
}

fn display_dashboard(tracker: &Tracker) {
    let summary = tracker.summary();

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  TODAY  {}", summary.period);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Doses taken: {}/{}   Adherence: {}   Points: {}",
        summary.medications_taken,
        summary.medications_total,
        format_rate(summary.adherence_rate),
        summary.total_points
    );
    println!();

    println!("  Medications");
    for item in tracker.items() {
        if let ScheduleItem::Medication(m) = item {
            println!(
                "    [{}] {}  {} {} - {}  🔥 {} day streak",
                check(m.completed),
                m.id,
                m.name,
                m.dosage,
                m.frequency,
                m.streak
            );
        }
    }

    println!("  Exercises");
    for item in tracker.items() {
        if let ScheduleItem::Exercise(e) = item {
            println!(
                "    [{}] {}  {} - {}",
                check(e.completed),
                e.id,
                e.name,
                e.duration
            );
        }
    }

    println!();
    println!(
        "  Exercises done: {}/{}   Pain: {}/10 ({})",
        summary.exercises_completed,
        summary.exercises_total,
        summary.pain_level,
        summary.pain_band
    );
    println!("  This week: {:+} points", summary.points_this_week);
    println!();
}

fn display_help() {
    println!("Commands:");
    println!("  take <id>          mark a medication dose taken");
    println!("  toggle <id>        mark an exercise done / not done");
    println!("  pain <0-10>        record your pain level");
    println!("  day <YYYY-MM-DD>   start a new day");
    println!("  status             show the dashboard");
    println!("  quit               end the session");
}

fn check(done: bool) -> char {
    if done {
        'x'
    } else {
        ' '
    }
}

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.0}%", r * 100.0),
        None => "n/a".to_string(),
    }
}
