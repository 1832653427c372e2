use anyhow::Result;
use docket_core::api::CaseFilter;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::Render;
use crate::utils::tui;

pub async fn run(ctx: &Context, status: Option<String>, search: Option<String>) -> Result<()> {
    let filter = CaseFilter { status, search };

    let spinner = tui::create_spinner("Loading cases");
    let result = ctx.client.list_cases(&filter).await;
    spinner.finish_and_clear();
    let cases = result?;

    if cases.is_empty() {
        println!("{}", "No cases found".dimmed());
        return Ok(());
    }

    for case in &cases {
        println!("{}", case.render());
    }

    Ok(())
}
