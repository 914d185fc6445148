use anyhow::Result;
use chrono::Local;
use leitura_core::content;
use owo_colors::OwoColorize;

use crate::session::Session;

/// Toggle a day's completion. Without an argument, today's plan day.
pub async fn run(day: Option<u32>) -> Result<()> {
    let session = Session::open()?;
    let progress = session.service.load(&session.identity).await;

    let day = match day {
        Some(day) => day,
        None => {
            let today = Local::now().date_naive();
            let plan_day = content::plan_day_for_date(today, progress.plan_start_date);
            if plan_day < 1 {
                anyhow::bail!(
                    "Your plan starts on {}; pass an explicit day to mark ahead",
                    progress.plan_start_date
                );
            }
            plan_day as u32
        }
    };
    if !content::day_in_plan(day, &progress.selection) {
        anyhow::bail!(
            "Day {day} is outside the plan; it runs from day 1 to {}.",
            content::total_days(&progress.selection)
        );
    }

    let before_badges = progress.unlocked_badges.len();
    let updated = session.service.toggle_day(&progress, day, &session.identity).await;

    if updated.completed_ids.contains(&day) {
        println!("{} Day {day} marked as read.", "✓".green());
    } else {
        println!("○ Day {day} unmarked.");
    }
    println!("  streak: {}", updated.streak.to_string().bold());

    for badge_id in updated.unlocked_badges.iter().skip(before_badges) {
        if let Some(badge) = leitura_core::badge::badge_by_id(badge_id) {
            println!(
                "  {} {} — {}",
                "★".yellow(),
                badge.label.bold(),
                badge.description
            );
        }
    }

    Ok(())
}
