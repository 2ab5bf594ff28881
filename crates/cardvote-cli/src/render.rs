//! Terminal rendering of controller state and notifications.

use colored::Colorize;

use cardvote_application::ReviewSnapshot;
use cardvote_core::content::{ContentItem, VoteDirection};
use cardvote_core::history::HistoryEntry;
use cardvote_core::notification::{Notification, Severity};
use cardvote_core::panel::{PanelKind, PanelState};

fn describe(item: &ContentItem) -> String {
    format!("{} [{} #{}]", item.name, item.source, item.source_id)
}

pub fn notification(notification: &Notification) {
    let line = format!("[{}] {}", notification.summary, notification.detail);
    let line = match notification.severity {
        Severity::Success => line.bright_green(),
        Severity::Warn => line.yellow(),
        Severity::Error => line.red(),
    };
    println!("{}", line);
}

pub fn card(snapshot: &ReviewSnapshot) {
    match &snapshot.current_item {
        Some(item) => {
            let mut badges = Vec::new();
            if snapshot.has_liked {
                badges.push("liked before".green().to_string());
            }
            if snapshot.has_disliked {
                badges.push("disliked before".red().to_string());
            }
            println!("{}", describe(item).bold());
            println!("  {}", item.image_url.bright_black());
            if !badges.is_empty() {
                println!("  {}", badges.join(", "));
            }
        }
        None if snapshot.loading => println!("{}", "Loading...".bright_black()),
        None => println!(
            "{}",
            "No item loaded. Type 'next' to try again.".bright_black()
        ),
    }
}

pub fn history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("{}", "No votes yet".bright_black());
        return;
    }
    for entry in entries {
        let direction = match entry.direction {
            VoteDirection::Like => "like   ".green(),
            VoteDirection::Dislike => "dislike".red(),
        };
        println!(
            "  {} {} {} (#{})",
            entry.timestamp.format("%H:%M:%S").to_string().bright_black(),
            direction,
            entry.name,
            entry.item_id
        );
    }
}

pub fn panel(kind: PanelKind, state: &PanelState) {
    print!("{} ", format!("{:<15}", kind.as_ref()).bright_magenta());
    if state.loading {
        println!("{}", "loading...".bright_black());
    } else if !state.error.is_empty() {
        println!("{}", state.error.red());
    } else {
        match &state.data {
            Some(evaluated) => {
                let when = evaluated
                    .last_evaluated_at
                    .map(|at| format!(", last vote {}", at.format("%Y-%m-%d %H:%M")))
                    .unwrap_or_default();
                println!(
                    "{} ({} likes, {} dislikes{})",
                    describe(&evaluated.item),
                    evaluated.likes,
                    evaluated.dislikes,
                    when
                );
            }
            None => println!("{}", "no data yet".bright_black()),
        }
    }
}
