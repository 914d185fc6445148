use anyhow::Result;
use chrono::Local;
use leitura_core::bible::BibleClient;
use leitura_core::content;
use owo_colors::OwoColorize;

use crate::session::Session;

pub async fn run(text: bool) -> Result<()> {
    let session = Session::open()?;
    let progress = session.service.load(&session.identity).await;

    let today = Local::now().date_naive();
    let day = content::plan_day_for_date(today, progress.plan_start_date);
    let total = content::total_days(&progress.selection);

    if day < 1 {
        println!(
            "Your plan starts on {}. Nothing to read yet.",
            progress.plan_start_date
        );
        return Ok(());
    }
    if day > total as i64 {
        println!(
            "{} Your plan ended on day {total}. Start a new one with `leitura plan set`.",
            "Done!".green().bold()
        );
        return Ok(());
    }

    let entry = content::entry_for_day(day, &progress.selection, progress.plan_start_date);
    let completed = progress.completed_ids.contains(&entry.day);
    let marker = if completed {
        "✓".green().to_string()
    } else {
        "○".to_string()
    };

    println!(
        "{} Day {} of {} — {}",
        marker,
        entry.day.to_string().bold(),
        total,
        entry.reading_range.bold()
    );
    if let Some(note) = progress.notes.get(&entry.day) {
        println!("  note: {note}");
    }

    if text {
        let chapters = BibleClient::new().fetch_reading(&entry).await;
        if chapters.is_empty() {
            println!("  (verse text unavailable right now)");
        }
        for chapter in chapters {
            println!();
            println!("{}", format!("{} {}", chapter.book_name, chapter.number).bold());
            for verse in &chapter.verses {
                println!("{}  {}", format!("{:>3}", verse.number).dimmed(), verse.text);
            }
        }
    }

    if !completed {
        println!("  mark it done with `leitura done`");
    }

    Ok(())
}
