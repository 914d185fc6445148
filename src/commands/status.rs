use anyhow::Result;
use leitura_core::badge;
use leitura_core::content;
use owo_colors::OwoColorize;

use crate::session::Session;

const BAR_WIDTH: usize = 24;

pub async fn run() -> Result<()> {
    let session = Session::open()?;
    let progress = session.service.load(&session.identity).await;

    let total = content::total_days(&progress.selection);
    let percent = content::completion_percent(&progress.completed_ids, total);

    let label = match &progress.selection {
        leitura_core::PlanSelection::Custom(config) => {
            format!("Plano Personalizado ({}, {} dias)", config.book_name, config.days)
        }
        other => content::plan_by_id(other.plan_id())
            .map(|p| p.label.to_string())
            .unwrap_or_else(|| other.plan_id().to_string()),
    };

    println!("{} ({})", label.bold(), session.identity);
    println!("  start: {}", progress.plan_start_date);

    let filled = (percent as usize * BAR_WIDTH) / 100;
    let bar: String = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);
    println!(
        "  [{}] {}% ({}/{} days)",
        bar.green(),
        percent,
        progress.completed_ids.len(),
        total
    );
    println!("  streak: {} days", progress.streak.to_string().bold());

    if !progress.unlocked_badges.is_empty() {
        println!("  badges:");
        for badge_id in &progress.unlocked_badges {
            match badge::badge_by_id(badge_id) {
                Some(badge) => println!("    {} {}", "★".yellow(), badge.label),
                None => println!("    {} {badge_id}", "★".yellow()),
            }
        }
    }

    Ok(())
}
