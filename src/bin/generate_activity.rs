use std::env;
use std::path::PathBuf;

use activity_planner::config::Config;
use activity_planner::export::{export_to_pdf, export_to_word, BrowserSurface};
use activity_planner::preferences::PreferenceStore;
use activity_planner::school::Semester;
use activity_planner::{ActivityContent, ContentGenerator, Shell};
use anyhow::Context;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const USAGE: &str =
    "Usage: generate_activity <subject_id> <semester: 1|2> <topic> [--config <path>] [--no-print] [--like]";

pub struct Args {
    pub subject_id: String,
    pub semester: Semester,
    pub topic: String,
    pub config_path: Option<PathBuf>,
    pub print: bool,
    pub like: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut positional = Vec::new();
    let mut config_path = None;
    let mut print = true;
    let mut like = false;

    let mut args = args;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(PathBuf::from(
                    args.next().context("--config needs a path")?,
                ))
            }
            "--no-print" => print = false,
            "--like" => like = true,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let subject_id = positional.next().context("subject_id is required")?;
    let semester = positional
        .next()
        .context("semester is required")?
        .parse::<Semester>()?;
    // topics are often several words, accept them unquoted
    let topic = positional.collect::<Vec<_>>().join(" ");
    if topic.trim().is_empty() {
        return Err(anyhow::anyhow!("topic is required"));
    }

    Ok(Args {
        subject_id,
        semester,
        topic,
        config_path,
        print,
        like,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", USAGE);
            return Err(e);
        }
    };

    let config = Config::load(args.config_path.as_deref()).context("failed to load configuration")?;

    let mut preferences = PreferenceStore::load(&config.settings.preferences_path)?;
    if args.like {
        preferences.toggle_like()?;
    }

    let generator = ContentGenerator::from_config(&config);
    let mut shell = Shell::new(config.profile.clone());
    shell.select_subject(&args.subject_id);
    shell.select_semester(args.semester);
    shell.set_topic(&args.topic);

    let activity = match shell.generate_with(&generator).cloned() {
        Some(activity) => activity,
        None => {
            let message = shell
                .error()
                .map(|e| e.message)
                .unwrap_or("unknown error");
            return Err(anyhow::anyhow!("{}", message));
        }
    };

    print_summary(&activity);

    let output_dir = &config.settings.output_dir;
    let path = export_to_word(&activity, &config.profile.school, output_dir)
        .context("failed to export Word document")?;
    println!("saved {BOLD}{}{RESET}", path.display());

    if args.print {
        let mut surface = BrowserSurface::new(output_dir);
        if !export_to_pdf(&activity, &config.profile.school, &mut surface) {
            shell.report_export_surface_unavailable();
            if let Some(error) = shell.error() {
                eprintln!("{}", error.message);
            }
        }
    }

    println!(
        "{} {BOLD}{}{RESET}",
        if preferences.liked() { "❤️" } else { "🤍" },
        preferences.likes_count()
    );

    Ok(())
}

fn print_summary(activity: &ActivityContent) {
    println!("{BOLD}{}{RESET}", activity.title);
    println!("{} | {}", activity.subject, activity.semester);
    println!("---");
    println!("{}", activity.objective);
    println!(
        "{} activities, game: {}, {} digital tools",
        activity.interactive_activities.len(),
        activity.competitive_game.name,
        activity.links().len()
    );
    println!("---\n");
}
