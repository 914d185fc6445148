use anyhow::Result;
use leitura_core::content;
use owo_colors::OwoColorize;

use crate::session::Session;

/// Show, set or delete the note on a plan day.
pub async fn run(day: u32, text: Option<String>, delete: bool) -> Result<()> {
    let session = Session::open()?;
    let progress = session.service.load(&session.identity).await;

    if !content::day_in_plan(day, &progress.selection) {
        anyhow::bail!(
            "Day {day} is outside the plan; it runs from day 1 to {}.",
            content::total_days(&progress.selection)
        );
    }

    if delete {
        if progress.notes.contains_key(&day) {
            session.service.delete_note(&progress, day, &session.identity).await;
            println!("Note on day {day} deleted.");
        } else {
            println!("No note on day {day}.");
        }
        return Ok(());
    }

    match text {
        Some(text) => {
            session
                .service
                .save_note(&progress, day, &text, &session.identity)
                .await;
            println!("{} Note saved on day {day}.", "✓".green());
        }
        None => match progress.notes.get(&day) {
            Some(note) => println!("Day {}: {note}", day.to_string().bold()),
            None => println!("No note on day {day}."),
        },
    }

    Ok(())
}
