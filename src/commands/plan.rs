use anyhow::{Context, Result};
use leitura_core::content::{self, READING_PLANS};
use leitura_core::{CustomPlanConfig, PlanSelection};
use owo_colors::OwoColorize;

use crate::session::Session;

pub async fn list() -> Result<()> {
    let session = Session::open()?;
    let progress = session.service.load(&session.identity).await;
    let current = progress.selection.plan_id().to_string();

    for plan in READING_PLANS {
        let marker = if plan.id == current { "●" } else { " " };
        println!(
            "{} {:<16} {} ({} dias)",
            marker.green(),
            plan.id.bold(),
            plan.label,
            plan.days
        );
    }
    println!(
        "  {:<16} Plano Personalizado — `leitura plan custom <livro> <dias>`",
        "custom".bold()
    );
    if let PlanSelection::Custom(config) = &progress.selection {
        println!(
            "{} currently reading {} over {} days",
            "●".green(),
            config.book_name,
            config.days
        );
    }

    Ok(())
}

pub async fn set(plan_id: &str) -> Result<()> {
    content::require_plan(plan_id)
        .context("See `leitura plan list`, or use `leitura plan custom`")?;

    let session = Session::open()?;
    let progress = session.service.load(&session.identity).await;
    let selection = PlanSelection::from_parts(plan_id, None);
    let updated = session
        .service
        .update_selection(&progress, selection, &session.identity)
        .await;

    println!(
        "{} Plan switched to {}. {} days already read in this plan.",
        "✓".green(),
        plan_id.bold(),
        updated.completed_ids.len()
    );
    Ok(())
}

pub async fn custom(book: &str, days: u32) -> Result<()> {
    let Some(book) = content::book_by_name(book) else {
        anyhow::bail!("Unknown book '{book}'. Use the Portuguese name, e.g. \"Gênesis\".");
    };
    if days == 0 {
        anyhow::bail!("The plan needs at least one day.");
    }

    let session = Session::open()?;
    let progress = session.service.load(&session.identity).await;
    let selection = PlanSelection::Custom(CustomPlanConfig {
        book_name: book.name.to_string(),
        days,
    });
    let updated = session
        .service
        .update_selection(&progress, selection, &session.identity)
        .await;

    println!(
        "{} Reading {} ({} chapters) over {} days. {} days already read.",
        "✓".green(),
        book.name.bold(),
        book.chapters,
        days,
        updated.completed_ids.len()
    );
    Ok(())
}
