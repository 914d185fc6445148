use anyhow::{Context, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::session::Session;

pub async fn run(date: &str) -> Result<()> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{date}', expected YYYY-MM-DD"))?;

    let session = Session::open()?;
    let progress = session.service.load(&session.identity).await;
    session
        .service
        .update_start_date(&progress, date, &session.identity)
        .await;

    println!("{} Plan now starts on {date} (day 1).", "✓".green());
    Ok(())
}
