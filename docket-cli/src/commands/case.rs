use anyhow::Result;
use chrono::Utc;
use docket_core::details::CaseDetails;
use docket_core::grid::entries;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::{Render, render_timeline};
use crate::utils::tui;

pub async fn run(ctx: &Context, id: &str) -> Result<()> {
    let spinner = tui::create_spinner("Loading case");
    let result = CaseDetails::load(&ctx.client, id, ctx.tz).await;
    spinner.finish_and_clear();
    let details = result?;

    print_details(&details, ctx);
    Ok(())
}

/// Case header, hearing history, upcoming events and documents.
fn print_details(details: &CaseDetails<chrono_tz::Tz>, ctx: &Context) {
    let case = &details.case;
    println!("{}", case.render());

    if let Some(case_type) = &case.case_type {
        println!("   {} {}", "Type:".dimmed(), case_type);
    }
    if let Some(court) = &case.court {
        println!("   {} {}", "Court:".dimmed(), court);
    }
    for party in &case.parties {
        match &party.role {
            Some(role) => println!("   {} {} ({})", "Party:".dimmed(), party.name, role),
            None => println!("   {} {}", "Party:".dimmed(), party.name),
        }
    }

    println!("\n{}", "Hearings".bold());
    println!("{}", render_timeline(details.timeline(), &ctx.tz));

    let now = Utc::now();
    let upcoming: Vec<_> = entries(&details.events, &ctx.tz)
        .into_iter()
        .filter(|e| e.start >= now)
        .collect();
    if !upcoming.is_empty() {
        println!("\n{}", "Upcoming".bold());
        for entry in &upcoming {
            let day = entry.start.with_timezone(&ctx.tz).format("%a %b %-d");
            println!("  {} {}", day.to_string().dimmed(), entry.render());
        }
    }

    if !details.documents.is_empty() {
        println!("\n{}", "Documents".bold());
        for doc in &details.documents {
            println!("  {}", doc.render());
        }
    }
}
