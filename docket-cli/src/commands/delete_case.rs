use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::context::Context;
use crate::utils::tui;

pub async fn run(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete case {id}? This cannot be undone"))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    let spinner = tui::create_spinner("Deleting case");
    let result = ctx.client.delete_case(id).await;
    spinner.finish_and_clear();
    result?;

    println!("{}", format!("  Deleted case {id}").red());
    Ok(())
}
