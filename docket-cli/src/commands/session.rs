use anyhow::Result;
use docket_core::config::DocketConfig;
use owo_colors::OwoColorize;

use crate::context::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let config_path = DocketConfig::config_path()?;
    let session = ctx.client.session();

    println!("{} {}", "Config:".dimmed(), config_path.display());
    println!("{} {}", "API:".dimmed(), ctx.client.base_url());
    println!("{} {}", "Time zone:".dimmed(), ctx.tz);
    println!("{} {}", "Session:".dimmed(), ctx.config.session_path().display());

    match (&session.user, session.is_authenticated()) {
        (Some(user), true) => {
            let mut line = format!("Signed in as {}", user.name.bold());
            if let Some(email) = &user.email {
                line.push_str(&format!(" <{email}>"));
            }
            if let Some(role) = &user.role {
                line.push_str(&format!(" {}", format!("({role})").dimmed()));
            }
            println!("\n{line}");
        }
        (None, true) => println!("\nSigned in (token only)"),
        (_, false) => println!("\n{}", "Not signed in. Requests are sent without a token".yellow()),
    }

    Ok(())
}
