use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use webara_workspace::Outcome;

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Project id
    pub project: String,
}

pub async fn publish(args: PublishArgs, ctx: &mut Context) -> Result<()> {
    let mut editor = ctx.open(&args.project).await?;

    let published = editor.publish().await;
    ctx.flush_notices();

    match published? {
        Outcome::Published { url } => {
            println!();
            println!("{} {}", "🚀 Live at".green().bold(), url.bright_white());
        }
        Outcome::AlreadyInFlight => println!("  {} Publish already running", "⚠️".yellow()),
        Outcome::Saved => {}
    }

    Ok(())
}
