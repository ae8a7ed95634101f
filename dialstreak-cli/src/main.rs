use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dialstreak_core::{
    classify_urgency, derive_streak, evaluate, project_celebrations, score_label, score_lead,
    CelebrationConfig, GoalStreak, GoalType, Metric,
};
use dialstreak_core::time::{local_date, parse_timezone};
use dialstreak_ingest::parsers::parse_dialer_csv;
use dialstreak_ingest::rows_to_events;
use dialstreak_store::Store;

#[derive(Parser, Debug)]
#[command(name = "dialstreak", version, about = "Telesales streaks, milestones, and lead scores")]
struct Cli {
    /// Override the state directory (default: ~/.dialstreak)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Credit today's login for an agent and print the streak
    Login {
        #[arg(long)]
        agent: String,
    },

    /// Show streak status and reminder urgency for an agent
    Status {
        #[arg(long)]
        agent: String,
    },

    /// Derive goal streaks, evaluate milestones, and celebrate new badges
    Milestones {
        #[arg(long)]
        agent: String,
    },

    /// Score a lead from its stored activity and deal metadata
    Score {
        #[arg(long)]
        contact: String,
    },

    /// Import a dialer call-log CSV into stored lead activity
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = match cli.root {
        Some(root) => Store::new(root),
        None => Store::open_default()?,
    };
    let now = Utc::now();

    match cli.command {
        Command::Login { agent } => cmd_login(&store, &agent, now),
        Command::Status { agent } => cmd_status(&store, &agent, now),
        Command::Milestones { agent } => cmd_milestones(&store, &agent, now),
        Command::Score { contact } => cmd_score(&store, &contact, now),
        Command::Import { csv } => cmd_import(&store, &csv),
    }
}

fn cmd_login(store: &Store, agent: &str, now: DateTime<Utc>) -> Result<()> {
    let profile = store.load_profile(agent)?;
    let tz: chrono_tz::Tz = parse_timezone(&profile.timezone)?;
    let today = local_date(now, tz);

    let before = store.load_streak(agent)?;
    let (outcome, after) = store.credit_login(agent, today, now)?;

    match outcome {
        dialstreak_store::CreditOutcome::Credited => {
            println!(
                "Login credited for {today}: streak {} -> {} (longest {})",
                before.state.current_streak,
                after.state.current_streak,
                after.state.longest_streak
            );
        }
        dialstreak_store::CreditOutcome::AlreadyCredited => {
            println!(
                "Already credited today: streak {} (longest {})",
                after.state.current_streak, after.state.longest_streak
            );
        }
    }
    Ok(())
}

fn cmd_status(store: &Store, agent: &str, now: DateTime<Utc>) -> Result<()> {
    let profile = store.load_profile(agent)?;
    let tz = parse_timezone(&profile.timezone)?;
    let record = store.load_streak(agent)?;

    println!(
        "Streak: {} (longest {}), last login: {}",
        record.state.current_streak,
        record.state.longest_streak,
        record
            .state
            .last_login_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "never".to_string())
    );

    let report = classify_urgency(&record.state, now, tz);
    if report.should_show {
        println!(
            "Reminder [{:?}]: {}h {}m until the streak resets",
            report.level, report.hours_remaining, report.minutes_remaining
        );
    } else {
        println!("No reminder needed.");
    }
    Ok(())
}

fn cmd_milestones(store: &Store, agent: &str, now: DateTime<Utc>) -> Result<()> {
    let profile = store.load_profile(agent)?;
    let tz = parse_timezone(&profile.timezone)?;
    let today = local_date(now, tz);
    let performance = store.load_measurements(agent)?;

    let mut streaks: Vec<GoalStreak> = Vec::new();
    for goal_type in [GoalType::Weekly, GoalType::Monthly] {
        for metric in Metric::ALL {
            let history = store.load_goal_history(agent, metric, goal_type)?;
            if history.is_empty() {
                continue;
            }
            let streak = derive_streak(&history, metric, goal_type, today, &performance)
                .with_context(|| format!("deriving {} {} streak", metric.label(), goal_type.label()))?;
            streaks.push(streak);
        }
    }

    let report = evaluate(&streaks);

    println!(
        "Badges: {} (legendary {}, epic {})",
        report.total_badges, report.legendary_count, report.epic_count
    );
    for e in &report.earned {
        println!(
            "  {} {} [{}]: {} {} streak at {}",
            e.milestone.icon,
            e.milestone.name,
            e.milestone.rarity.label(),
            e.metric.label(),
            e.goal_type.label(),
            e.current_streak
        );
    }
    for u in &report.upcoming {
        println!(
            "  next: {} {} in {} more {} period(s)",
            u.milestone.icon,
            u.milestone.name,
            u.remaining,
            u.goal_type.label()
        );
    }

    // One-time celebrations: diff against the remembered earned set.
    let prev = store.load_earned(agent)?;
    let config = CelebrationConfig {
        play_sound: profile.celebration_sounds,
    };
    for c in project_celebrations(&prev, &report.earned, config) {
        println!(
            "🎉 NEW BADGE: {} [{}]{}",
            c.title,
            c.rarity.label(),
            if c.play_sound { " ♪" } else { "" }
        );
    }
    let keys: Vec<_> = report.earned.iter().map(|e| e.key()).collect();
    store.save_earned(agent, &keys)?;

    Ok(())
}

fn cmd_score(store: &Store, contact: &str, now: DateTime<Utc>) -> Result<()> {
    let events = store.load_activity(contact)?;
    let card = store.load_lead(contact)?;

    let breakdown = score_lead(&events, card.deal_value, card.expected_close_date, now);
    let label = score_label(breakdown.total_score);

    println!("Lead {contact}: {:.0}/100 ({})", breakdown.total_score, label.label());
    println!("{}", serde_json::to_string_pretty(&breakdown)?);
    Ok(())
}

fn cmd_import(store: &Store, csv: &PathBuf) -> Result<()> {
    if !csv.exists() {
        bail!("CSV not found: {}", csv.display());
    }

    let rows = parse_dialer_csv(csv).with_context(|| format!("parsing {}", csv.display()))?;
    let events = rows_to_events(&rows)?;

    let mut imported = 0usize;
    let mut by_contact: Vec<(String, Vec<dialstreak_core::LeadActivityEvent>)> = Vec::new();
    for (contact_id, event) in events {
        match by_contact.iter_mut().find(|(c, _)| *c == contact_id) {
            Some((_, list)) => list.push(event),
            None => by_contact.push((contact_id, vec![event])),
        }
    }
    for (contact_id, list) in &by_contact {
        store.append_activity(contact_id, list)?;
        imported += list.len();
    }

    println!(
        "Imported {} event(s) across {} contact(s) from {}",
        imported,
        by_contact.len(),
        csv.display()
    );
    Ok(())
}
