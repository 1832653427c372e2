use anyhow::{Result, bail};
use dialoguer::Input;
use docket_core::details::CaseDetails;
use docket_core::hearing::ordinal_label;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::render::render_timeline;
use crate::utils::tui;

/// Without a hearing number, list the timeline. With one, show that
/// hearing's outcome or record a new one.
pub async fn run(
    ctx: &Context,
    case_id: &str,
    hearing: Option<usize>,
    outcome: Option<String>,
) -> Result<()> {
    let spinner = tui::create_spinner("Loading case");
    let result = CaseDetails::load(&ctx.client, case_id, ctx.tz).await;
    spinner.finish_and_clear();
    let mut details = result?;

    let Some(number) = hearing else {
        println!("{}", render_timeline(details.timeline(), &ctx.tz));
        return Ok(());
    };

    let Some(index) = hearing_index(number) else {
        bail!("Hearings are numbered from 1");
    };

    // Fail early on a bad number or an unrecorded first hearing
    let entry = details.timeline().get(index)?;
    let label = ordinal_label(index);

    let outcome = match outcome {
        Some(o) => o,
        None => {
            details.timeline().outcome_target(index)?;
            if entry.has_outcome() {
                println!("  {} {}", format!("{label} hearing:").dimmed(), entry.outcome);
            }
            Input::<String>::new()
                .with_prompt(format!("  Outcome of the {} hearing", label.to_lowercase()))
                .interact_text()?
        }
    };

    let spinner = tui::create_spinner("Saving outcome");
    let result = details.record_outcome(&ctx.client, index, &outcome).await;
    spinner.finish_and_clear();
    let entry = result?;

    println!(
        "{}",
        format!("  Recorded for the {} hearing: {}", label.to_lowercase(), entry.outcome).green()
    );
    Ok(())
}

/// Listed numbers start at 1.
fn hearing_index(number: usize) -> Option<usize> {
    number.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hearing_numbers_are_one_based() {
        assert_eq!(hearing_index(1), Some(0));
        assert_eq!(hearing_index(11), Some(10));
        assert_eq!(hearing_index(0), None);
    }
}
