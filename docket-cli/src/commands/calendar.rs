use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use docket_core::EventType;
use docket_core::grid::ViewMode;
use docket_core::view::{Applied, CalendarView};
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::{render_days, render_month};
use crate::utils::tui;

pub async fn run(
    ctx: &Context,
    mode: ViewMode,
    cursor: NaiveDate,
    event_type: Option<EventType>,
    case: Option<String>,
) -> Result<()> {
    let mut view = CalendarView::new(ctx.tz, mode, cursor);
    view.set_filters(event_type, case);

    let spinner = tui::create_spinner(format!("Loading {mode}"));
    let applied = view.refresh(&ctx.client).await;
    spinner.finish_and_clear();

    if let Applied::Fresh { errors } = &applied {
        for e in errors {
            eprintln!("{}", format!("  Could not load everything: {e}").yellow());
        }
    }

    let (first, last) = mode.bounds(view.cursor());
    let heading = match mode {
        ViewMode::Month => first.format("%B %Y").to_string(),
        ViewMode::Week => format!("{} – {}", first.format("%b %-d"), last.format("%b %-d, %Y")),
    };
    println!("{}\n", heading.bold());

    let cells = view.grid();
    let today = ctx.today();

    match mode {
        ViewMode::Month => {
            println!("{}", render_month(&cells, today));
            let days = render_days(&cells, today, false);
            if days.is_empty() {
                println!("\n{}", "No events this month".dimmed());
            } else {
                println!("\n{days}");
            }
        }
        ViewMode::Week => println!("{}", render_days(&cells, today, true)),
    }

    Ok(())
}

/// Parse "YYYY-MM" into the first day of that month.
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{input}', expected YYYY-MM"))
}
