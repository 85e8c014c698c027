use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fmt::Write;
use webara_editor::{Document, Element, Region};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Display name of the project
    #[arg(default_value = "Untitled Project")]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Project id
    pub project: String,

    /// Print the raw canvas JSON instead of the outline
    #[arg(long)]
    pub json: bool,
}

pub async fn new(args: NewArgs, ctx: &mut Context) -> Result<()> {
    let created = ctx.store().create_project(&args.name).await;
    match created {
        Ok(record) => {
            ctx.notifier().success("Project created!");
            ctx.flush_notices();
            println!("  {} {}", "id:".bright_black(), record.id.bright_white());
            Ok(())
        }
        Err(e) => {
            ctx.notifier().error("Failed to create project");
            ctx.flush_notices();
            Err(e.into())
        }
    }
}

pub async fn list(_args: ListArgs, ctx: &mut Context) -> Result<()> {
    let listed = ctx.store().list_projects().await;
    let records = match listed {
        Ok(records) => records,
        Err(e) => {
            ctx.notifier().error("Failed to load projects");
            ctx.flush_notices();
            return Err(e.into());
        }
    };

    if records.is_empty() {
        println!("No projects yet. Run: webara new \"My Site\"");
        return Ok(());
    }

    for record in records {
        let updated = record
            .updated_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let status = match &record.published_url {
            Some(url) if record.published => url.green().to_string(),
            _ => "draft".bright_black().to_string(),
        };

        println!(
            "{}  {}  {}  {}",
            record.id.bright_white(),
            record.name.bold(),
            updated.bright_black(),
            status
        );
    }

    Ok(())
}

pub async fn show(args: ShowArgs, ctx: &mut Context) -> Result<()> {
    let editor = ctx.open(&args.project).await?;

    if args.json {
        println!("{}", editor.document().to_json_pretty()?);
        return Ok(());
    }

    println!("{} {}", editor.name().bold(), format!("({})", editor.id()).bright_black());
    if let Some(url) = editor.record().published_url.as_deref().filter(|_| editor.record().published) {
        println!("Published at {}", url.green());
    }
    println!();
    print!("{}", outline(editor.document()));

    Ok(())
}

/// Indented region → section → container → element outline
pub fn outline(doc: &Document) -> String {
    let mut out = String::new();

    for region in Region::ALL {
        let _ = writeln!(out, "{}", region.as_str().to_uppercase());

        let sections = doc.sections(region);
        if sections.is_empty() {
            let _ = writeln!(out, "  (empty)");
        }

        for section in sections {
            let _ = writeln!(out, "  section {}", section.id);
            for container in &section.containers {
                let _ = writeln!(out, "    container {}", container.id);
                for element in &container.elements {
                    let _ = writeln!(out, "      {}", describe(element));
                }
            }
            for element in &section.direct_elements {
                let _ = writeln!(out, "    {}", describe(element));
            }
        }
    }

    out
}

fn describe(element: &Element) -> String {
    match element.content_str("text") {
        Some(text) => format!("{} {} \"{}\"", element.kind, element.id, text),
        None => format!("{} {}", element.kind, element.id),
    }
}
