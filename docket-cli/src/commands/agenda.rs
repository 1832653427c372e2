use anyhow::Result;
use docket_core::EventType;
use docket_core::api::EventFilter;
use docket_core::date_range::DateRange;
use docket_core::grid::entries;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::{Render, day_label};
use crate::utils::tui;

pub async fn run(
    ctx: &Context,
    from: Option<&str>,
    to: Option<&str>,
    event_type: Option<EventType>,
    case: Option<String>,
) -> Result<()> {
    let range = DateRange::from_args(from, to, &ctx.tz)?;
    let filter = EventFilter::in_range(&range)
        .with_type(event_type)
        .with_case(case);

    let spinner = tui::create_spinner("Loading agenda");
    let result = ctx.client.list_events(&filter).await;
    spinner.finish_and_clear();

    let events: Vec<_> = result?
        .into_iter()
        .filter(|e| range.contains(e.start))
        .collect();

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let today = ctx.today();
    let mut current_date = None;

    for entry in entries(&events, &ctx.tz) {
        let date = entry.start.with_timezone(&ctx.tz).date_naive();

        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", day_label(date, today).bold());
            current_date = Some(date);
        }

        println!("  {}", entry.render());
    }

    Ok(())
}
