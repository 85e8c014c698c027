use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project store directory
    #[arg(short, long)]
    pub store_dir: Option<String>,

    /// Domain suffix for published sites
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), DEFAULT_CONFIG_NAME.bright_white());
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Webara workspace...".bright_blue().bold());

    let defaults = Config::default();
    let config = Config {
        store_dir: args.store_dir.unwrap_or(defaults.store_dir),
        publish_domain: args.domain.unwrap_or(defaults.publish_domain),
        log_level: defaults.log_level,
    };

    let store_path = config.store_path(cwd);
    if !store_path.exists() {
        fs::create_dir_all(&store_path)?;
        println!("  {} Created {}/", "✓".green(), config.store_dir);
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Workspace initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: webara new \"My Site\"");
    println!("  2. Run: webara drop <project> --type text");
    println!("  3. Run: webara publish <project>");

    Ok(())
}
