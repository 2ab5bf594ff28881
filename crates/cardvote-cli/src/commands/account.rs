use anyhow::{Result, bail};
use colored::Colorize;

use cardvote_core::user::AuthOutcome;

use crate::context::AppContext;

fn report(outcome: AuthOutcome) -> Result<()> {
    if !outcome.success {
        bail!("{}", outcome.message);
    }
    if let Some(user) = outcome.user {
        println!(
            "{}",
            format!("Signed in as {} <{}>", user.display_name, user.email).bright_green()
        );
    }
    Ok(())
}

pub async fn register(context: &AppContext, email: &str, name: &str, password: &str) -> Result<()> {
    report(context.session.register(email, name, password).await)
}

pub async fn login(context: &AppContext, email: &str, password: &str) -> Result<()> {
    report(context.session.login(email, password).await)
}

pub fn logout(context: &AppContext) {
    context.session.logout();
    println!("{}", "Signed out".bright_green());
}

pub fn whoami(context: &AppContext) {
    match context.session.current_user() {
        Some(user) => println!("{} <{}>", user.display_name, user.email),
        None => println!("{}", "Not signed in".bright_black()),
    }
}
