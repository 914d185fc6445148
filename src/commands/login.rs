use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::CliConfig;

/// Point the session at a remote account. Progress already on the
/// remote is picked up on the next load.
pub async fn login(user_id: &str) -> Result<()> {
    let mut config = CliConfig::load()?;
    if config.remote.is_none() {
        anyhow::bail!(
            "No [remote] section in the config. Add one first:\n\n\
            [remote]\n\
            url = \"https://your-project.supabase.co\"\n\
            api_key = \"your-anon-key\""
        );
    }

    config.user_id = Some(user_id.to_string());
    config.save()?;

    println!("{} Signed in as {user_id}.", "✓".green());
    println!("Run `leitura status` to pull your progress.");
    Ok(())
}

/// Clear the session pointer. Remote data and the local caches are
/// kept; only who-is-signed-in changes.
pub async fn logout() -> Result<()> {
    let mut config = CliConfig::load()?;
    if config.user_id.take().is_none() {
        println!("Not signed in.");
        return Ok(());
    }
    config.save()?;
    println!("Signed out. Back to guest mode.");
    Ok(())
}
