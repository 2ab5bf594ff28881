//! Interactive review loop.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

use cardvote_application::{ChannelNotifier, ReviewSessionController, VoteDispatch};
use cardvote_core::content::VoteDirection;
use cardvote_core::notification::Notification;
use cardvote_core::panel::PanelKind;
use cardvote_core::route::{Navigator, Route};

use crate::context::AppContext;
use crate::render;

const COMMANDS: &[&str] = &[
    "like", "dislike", "next", "show", "tab", "history", "panels", "logout", "help", "quit",
];

/// One line typed at the review prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Vote(VoteDirection),
    Next,
    Show,
    Tab(String),
    History,
    Panels,
    Logout,
    Help,
    Quit,
}

impl ReplCommand {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?;
        let argument = parts.next().unwrap_or_default();
        match command {
            "like" | "l" => Some(Self::Vote(VoteDirection::Like)),
            "dislike" | "d" => Some(Self::Vote(VoteDirection::Dislike)),
            "next" | "n" => Some(Self::Next),
            "show" => Some(Self::Show),
            "tab" => Some(Self::Tab(argument.to_string())),
            "history" => Some(Self::History),
            "panels" => Some(Self::Panels),
            "logout" => Some(Self::Logout),
            "help" => Some(Self::Help),
            "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Ends the loop once the controller navigates to the login view.
#[derive(Default)]
struct ReplNavigator {
    left: AtomicBool,
}

impl ReplNavigator {
    fn left_review(&self) -> bool {
        self.left.load(Ordering::SeqCst)
    }
}

impl Navigator for ReplNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!("Navigating to {}", route);
        if route != Route::Gallery {
            self.left.store(true, Ordering::SeqCst);
        }
    }
}

/// rustyline helper completing and highlighting review commands.
#[derive(Clone)]
struct ReviewHelper;

impl Helper for ReviewHelper {}

impl Completer for ReviewHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if let Some(prefix) = line.strip_prefix("tab ") {
            let candidates = PanelKind::iter()
                .map(|kind| kind.to_string())
                .filter(|name| name.starts_with(prefix))
                .map(|name| Pair {
                    display: name.clone(),
                    replacement: name,
                })
                .collect();
            return Ok((4, candidates));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ReviewHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if ReplCommand::parse(line).is_some() {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReviewHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.is_empty() || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ReviewHelper {}

fn print_help() {
    println!("{}", "Commands:".bright_black());
    println!("{}", "  like | dislike      vote on the current item".bright_black());
    println!("{}", "  next                skip to another item".bright_black());
    println!("{}", "  show                the current item again".bright_black());
    println!(
        "{}",
        "  tab <name>          top-like | top-dislike | last-evaluated".bright_black()
    );
    println!("{}", "  history             your last votes".bright_black());
    println!("{}", "  panels              all leaderboard panels".bright_black());
    println!("{}", "  logout | quit".bright_black());
}

fn drain(notifications: &mut mpsc::UnboundedReceiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        render::notification(&notification);
    }
}

async fn execute(
    controller: &ReviewSessionController,
    notifications: &mut mpsc::UnboundedReceiver<Notification>,
    command: ReplCommand,
) {
    match command {
        ReplCommand::Vote(direction) => match controller.vote(direction).await {
            VoteDispatch::Submitted => {
                drain(notifications);
                controller.wait_idle().await;
                drain(notifications);
                render::card(&controller.snapshot());
            }
            VoteDispatch::NoItem => {
                println!("{}", "Nothing to vote on. Type 'next' to load an item.".yellow())
            }
            VoteDispatch::Busy => println!("{}", "A vote is still in flight".yellow()),
            VoteDispatch::Rejected | VoteDispatch::Failed => drain(notifications),
        },
        ReplCommand::Next => {
            if controller.snapshot().current_item.is_some() {
                controller.next_item().await;
            } else {
                controller.activate().await;
            }
            drain(notifications);
            render::card(&controller.snapshot());
        }
        ReplCommand::Show => render::card(&controller.snapshot()),
        ReplCommand::Tab(name) => {
            controller.tab_change(&name).await;
            let snapshot = controller.snapshot();
            if snapshot.can_view_protected {
                render::panel(snapshot.active_tab, snapshot.panels.get(snapshot.active_tab));
            } else {
                println!("{}", "Sign in to view leaderboards".yellow());
            }
        }
        ReplCommand::History => render::history(&controller.snapshot().history),
        ReplCommand::Panels => {
            let snapshot = controller.snapshot();
            for kind in PanelKind::iter() {
                render::panel(kind, snapshot.panels.get(kind));
            }
        }
        ReplCommand::Logout => controller.logout(),
        ReplCommand::Help => print_help(),
        ReplCommand::Quit => {}
    }
}

pub async fn run(context: &AppContext) -> Result<()> {
    let (notifier, mut notifications) = ChannelNotifier::new();
    let navigator = Arc::new(ReplNavigator::default());
    let controller = ReviewSessionController::new(
        context.gateway.clone(),
        context.session.clone(),
        Arc::new(notifier),
        navigator.clone(),
        context.config.review.clone(),
    );

    println!("{}", "=== CardVote ===".bright_magenta().bold());
    match context.session.current_user() {
        Some(user) => println!("{}", format!("Signed in as {}", user.display_name).bright_black()),
        None => println!(
            "{}",
            "Browsing anonymously, leaderboards need 'cardvote login'".bright_black()
        ),
    }
    println!("{}", "Type 'help' for commands or 'quit' to exit.".bright_black());
    println!();

    controller.activate().await;
    drain(&mut notifications);
    render::card(&controller.snapshot());

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReviewHelper));

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match ReplCommand::parse(trimmed) {
                    Some(ReplCommand::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Some(command) => execute(&controller, &mut notifications, command).await,
                    None => println!("{}", "Unknown command, type 'help'".bright_black()),
                }
                drain(&mut notifications);

                if navigator.left_review() {
                    println!("{}", "Signed out. Run 'cardvote login' to continue.".bright_green());
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    controller.wait_idle().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ReplCommand::parse("like"),
            Some(ReplCommand::Vote(VoteDirection::Like))
        );
        assert_eq!(
            ReplCommand::parse("d"),
            Some(ReplCommand::Vote(VoteDirection::Dislike))
        );
        assert_eq!(
            ReplCommand::parse("tab  last-evaluated"),
            Some(ReplCommand::Tab("last-evaluated".to_string()))
        );
        assert_eq!(ReplCommand::parse("tab"), Some(ReplCommand::Tab(String::new())));
        assert_eq!(ReplCommand::parse("show"), Some(ReplCommand::Show));
        assert_eq!(ReplCommand::parse("exit"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("vote"), None);
    }

    #[test]
    fn test_navigator_leaves_on_login() {
        let navigator = ReplNavigator::default();
        navigator.navigate(Route::Gallery);
        assert!(!navigator.left_review());
        navigator.navigate(Route::Login);
        assert!(navigator.left_review());
    }
}
