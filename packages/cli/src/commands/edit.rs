use super::Context;
use anyhow::{bail, Context as _, Result};
use clap::Args;
use colored::Colorize;
use webara_editor::{palette, DragPayload, DropOutcome, DropTarget, ElementPatch, Region};
use webara_workspace::{Outcome, ProjectEditor};

#[derive(Debug, Args)]
pub struct AddSectionArgs {
    /// Project id
    pub project: String,

    /// Region to append to (top, middle, bottom)
    #[arg(short, long, default_value = "middle")]
    pub region: Region,
}

#[derive(Debug, Args)]
pub struct DropArgs {
    /// Project id
    pub project: String,

    /// Element type tag (see `webara palette`)
    #[arg(short = 't', long = "type")]
    pub kind: String,

    /// Display label; defaults to the palette label for the type
    #[arg(short, long)]
    pub label: Option<String>,

    /// Target section; omit to drop on the canvas root
    #[arg(short, long)]
    pub section: Option<String>,

    /// Target container inside the section
    #[arg(short, long, requires = "section")]
    pub container: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Project id
    pub project: String,

    /// Id of the element to edit
    pub element: String,

    /// JSON patch, e.g. '{"content":{"text":"Hello"}}'
    #[arg(short, long)]
    pub patch: String,
}

pub async fn add_section(args: AddSectionArgs, ctx: &mut Context) -> Result<()> {
    let mut editor = ctx.open(&args.project).await?;

    let section_id = editor.session_mut().add_section(args.region);
    println!("  {} Added section {} to {}", "✓".green(), section_id.bright_white(), args.region);

    save(&editor, ctx).await
}

pub async fn drop_element(args: DropArgs, ctx: &mut Context) -> Result<()> {
    let mut editor = ctx.open(&args.project).await?;

    let target = match (args.section, args.container) {
        (Some(section), Some(container)) => DropTarget::container(section, container),
        (Some(section), None) => DropTarget::section(section),
        (None, _) => DropTarget::CanvasRoot,
    };
    let payload = drag_payload(&args.kind, args.label);

    match editor.session_mut().handle_drop(&target, &payload) {
        DropOutcome::Created { node_id } => {
            println!("  {} Created {}", "✓".green(), node_id.bright_white());
            save(&editor, ctx).await
        }
        DropOutcome::Ignored(reason) => {
            println!("  {} Nothing dropped: {}", "⚠️".yellow(), reason);
            Ok(())
        }
    }
}

pub async fn edit(args: EditArgs, ctx: &mut Context) -> Result<()> {
    let patch: ElementPatch = serde_json::from_str(&args.patch).context("Invalid --patch JSON")?;
    let mut editor = ctx.open(&args.project).await?;

    let session = editor.session_mut();
    if !session.select_element_by_id(&args.element) {
        bail!("Element not found: {}", args.element);
    }

    if !session.update_element(&patch) {
        println!("  {} No changes", "⚠️".yellow());
        return Ok(());
    }

    println!("  {} Updated {}", "✓".green(), args.element.bright_white());
    save(&editor, ctx).await
}

/// Payload a drag of `kind` from the palette would carry
fn drag_payload(kind: &str, label: Option<String>) -> DragPayload {
    let palette_label = palette::element_library()
        .iter()
        .chain(palette::component_library())
        .find(|item| item.kind == kind)
        .map(|item| item.label.to_string());

    let label = label.or(palette_label).unwrap_or_else(|| kind.to_string());
    DragPayload::new(kind, label)
}

async fn save(editor: &ProjectEditor, ctx: &mut Context) -> Result<()> {
    let saved = editor.save().await;
    ctx.flush_notices();

    match saved? {
        Outcome::AlreadyInFlight => println!("  {} Save already running", "⚠️".yellow()),
        Outcome::Saved | Outcome::Published { .. } => {}
    }
    Ok(())
}
