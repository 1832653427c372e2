use anyhow::{Result, bail};
use chrono::Utc;
use docket_core::draft::EventEdit;
use docket_core::grid::{CalendarEntry, ViewMode};
use docket_core::view::CalendarView;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::Render;
use crate::utils::tui;

pub async fn run(ctx: &Context, id: &str, edit: EventEdit) -> Result<()> {
    if edit == EventEdit::default() {
        bail!("Nothing to change. Pass at least one of --title, --date/--time, --type, --case, --location, --description");
    }

    let mut view = CalendarView::new(ctx.tz, ViewMode::Week, edit.date.unwrap_or_else(|| ctx.today()));
    let spinner = tui::create_spinner("Updating event");
    let result = view.update(&ctx.client, id, &edit, Utc::now()).await;
    spinner.finish_and_clear();
    let updated = result?;

    println!("{}", format!("  Updated: {}", updated.title).green());
    println!("  {}", CalendarEntry::from_event(&updated, &ctx.tz).render());

    Ok(())
}
