use anyhow::Result;
use clap::Args;
use colored::Colorize;
use webara_editor::palette::{component_library, elements_in, Category};

#[derive(Debug, Args)]
pub struct PaletteArgs {
    /// Print the palette as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn palette(args: PaletteArgs) -> Result<()> {
    if args.json {
        let value = serde_json::json!({
            "elements": webara_editor::palette::element_library(),
            "components": component_library(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "ELEMENTS".bold());
    for category in Category::ALL {
        println!("  {}", category.label().bright_blue());
        for item in elements_in(category) {
            println!("    {:<12} {}", item.kind, item.label.bright_black());
        }
    }

    println!();
    println!("{}", "COMPONENTS".bold());
    for item in component_library() {
        println!(
            "  {:<18} {:<20} {}",
            item.kind,
            item.label,
            item.description.unwrap_or_default().bright_black()
        );
    }

    Ok(())
}
