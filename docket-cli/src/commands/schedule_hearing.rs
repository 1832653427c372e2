use anyhow::Result;
use chrono::Utc;
use dialoguer::Input;
use docket_core::datetime::parse_date;
use docket_core::details::CaseDetails;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::render_timeline;
use crate::utils::tui;

pub async fn run(
    ctx: &Context,
    case_id: &str,
    date: Option<String>,
    time: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let spinner = tui::create_spinner("Loading case");
    let result = CaseDetails::load(&ctx.client, case_id, ctx.tz).await;
    spinner.finish_and_clear();
    let mut details = result?;

    println!("{}", format!("  Hearing for {}", details.case).bold());

    let date = match date {
        Some(d) => parse_date(&d)?,
        None => parse_date(
            &Input::<String>::new()
                .with_prompt("  Date (YYYY-MM-DD)")
                .interact_text()?,
        )?,
    };
    let time = match time {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Time (e.g. 10:30 AM)")
            .interact_text()?,
    };

    let spinner = tui::create_spinner("Scheduling hearing");
    let result = details
        .schedule_hearing(&ctx.client, Some(date), &time, description, Utc::now())
        .await;
    spinner.finish_and_clear();
    let created = result?;

    println!("{}", format!("  Scheduled: {}", created.title).green());
    println!("  {}", format!("id: {}", created.id).dimmed());
    println!("\n{}", render_timeline(details.timeline(), &ctx.tz));

    Ok(())
}
