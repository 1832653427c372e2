use anyhow::Result;
use chrono::Utc;
use dialoguer::{Input, Select};
use docket_core::api::CaseFilter;
use docket_core::datetime::{parse_date, parse_time};
use docket_core::draft::EventDraft;
use docket_core::grid::{CalendarEntry, ViewMode};
use docket_core::view::CalendarView;
use docket_core::{EventType, ValidationError};
use owo_colors::OwoColorize;
use tracing::warn;

use crate::context::Context;
use crate::render::Render;
use crate::utils::tui;

/// Whatever was given on the command line. Missing pieces are prompted for.
pub struct NewArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub event_type: Option<EventType>,
    pub case: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

pub async fn run(ctx: &Context, args: NewArgs) -> Result<()> {
    let interactive = args.title.is_none() || args.date.is_none() || args.time.is_none();

    // --- Title ---
    let title = match args.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Date ---
    let date = match args.date {
        Some(d) => parse_date(&d)?,
        None => prompt_with_retry("  Date (YYYY-MM-DD)", parse_date)?,
    };

    // --- Time ---
    let time = match args.time {
        Some(t) => t,
        None => prompt_with_retry("  Time (e.g. 10:30 AM)", |input| {
            parse_time(input).map(|_| input.trim().to_string())
        })?,
    };

    // --- Type ---
    let event_type = match args.event_type {
        Some(t) => t,
        None if interactive => prompt_event_type()?,
        None => EventType::default(),
    };

    // --- Case ---
    let case_id = match args.case {
        Some(c) => Some(c),
        None if interactive => prompt_case(ctx).await?,
        None => None,
    };

    // --- Location ---
    let location = match args.location {
        Some(loc) => Some(loc),
        None if interactive => {
            let loc: String = Input::new()
                .with_prompt("  Where? (skip)")
                .default(String::new())
                .show_default(false)
                .interact_text()?;
            Some(loc)
        }
        None => None,
    };

    let draft = EventDraft {
        title,
        date: Some(date),
        time,
        event_type,
        location,
        description: args.description,
        case_id,
    };

    let mut view = CalendarView::new(ctx.tz, ViewMode::Month, date);
    let spinner = tui::create_spinner("Creating event");
    let result = view.create(&ctx.client, &draft, Utc::now()).await;
    spinner.finish_and_clear();
    let created = result?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {draft}").green());
    println!("  {}", CalendarEntry::from_event(&created, &ctx.tz).render());
    println!("  {}", format!("id: {}", created.id).dimmed());

    Ok(())
}

/// Prompt the user with retry on validation errors.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T, ValidationError>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

fn prompt_event_type() -> Result<EventType> {
    let items: Vec<&str> = EventType::ALL.iter().map(|t| t.label()).collect();
    let selection = Select::new()
        .with_prompt("  Type")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(EventType::ALL[selection])
}

/// Offer the open cases to attach the event to. A failed case fetch only
/// means the event is created without one.
async fn prompt_case(ctx: &Context) -> Result<Option<String>> {
    let spinner = tui::create_spinner("  Loading cases");
    let result = ctx.client.list_cases(&CaseFilter::default()).await;
    spinner.finish_and_clear();

    let cases = match result {
        Ok(cases) if !cases.is_empty() => cases,
        Ok(_) => return Ok(None),
        Err(e) => {
            warn!(error = %e, "could not load cases for selection");
            return Ok(None);
        }
    };

    let mut items = vec!["(no case)".to_string()];
    items.extend(cases.iter().map(|c| c.to_string()));

    let selection = Select::new()
        .with_prompt("  Case")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(selection
        .checked_sub(1)
        .and_then(|i| cases.get(i))
        .map(|c| c.id.clone()))
}
