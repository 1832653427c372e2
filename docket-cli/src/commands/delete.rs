use anyhow::Result;
use dialoguer::Confirm;
use docket_core::grid::ViewMode;
use docket_core::view::CalendarView;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::utils::tui;

pub async fn run(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    // Confirm unless --yes
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete event {id}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    let mut view = CalendarView::new(ctx.tz, ViewMode::Week, ctx.today());
    let spinner = tui::create_spinner("Deleting event");
    let result = view.delete(&ctx.client, id).await;
    spinner.finish_and_clear();
    result?;

    println!("{}", format!("  Deleted event {id}").red());
    Ok(())
}
