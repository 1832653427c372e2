use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use docket_core::api::DocumentUpload;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::Render;
use crate::utils::tui;

pub async fn run(
    ctx: &Context,
    path: PathBuf,
    title: Option<String>,
    case: Option<String>,
    description: Option<String>,
) -> Result<()> {
    if !path.is_file() {
        bail!("No such file: {}", path.display());
    }

    let title = title.unwrap_or_else(|| default_title(&path));
    let upload = DocumentUpload {
        path,
        title,
        case_id: case,
        description,
    };

    let spinner = tui::create_spinner(format!("Uploading {}", upload.title));
    let result = ctx.client.upload_document(&upload).await;
    spinner.finish_and_clear();
    let document = result?;

    println!("{}", "  Uploaded:".green());
    println!("  {}", document.render());
    Ok(())
}

/// File name without its extension.
fn default_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Document".to_string())
}
