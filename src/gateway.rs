//! Confirmation and notification gateway.
//!
//! The store engine never talks to the terminal directly: destructive
//! mutations go through a [`ConfirmationGate`] before they apply, and every
//! mutation outcome is surfaced through a [`Notifier`]. The CLI front end
//! plugs in the terminal implementations below; tests plug in recording
//! fakes.

use std::io::{stdin, stdout, Write};

use console::style;
use log::{error, info, warn};

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Destructive,
}

/// A single user-visible mutation outcome.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Normal,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

/// Sink for mutation outcomes.
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

/// Gate in front of destructive mutations. Returning `false` abandons the
/// operation with no state change.
pub trait ConfirmationGate {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Prints notifications to the terminal with console styling.
pub struct TermNotifier;

impl Notifier for TermNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.severity {
            Severity::Normal => println!(
                "{} {}",
                style(&notification.title).green().bold(),
                notification.description
            ),
            Severity::Destructive => eprintln!(
                "{} {}",
                style(&notification.title).red().bold(),
                notification.description
            ),
        }
    }
}

/// Routes notifications to the log only. Useful for non-interactive use.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.severity {
            Severity::Normal => info!("{}: {}", notification.title, notification.description),
            Severity::Destructive => {
                error!("{}: {}", notification.title, notification.description)
            }
        }
    }
}

/// Interactive y/N prompt on the terminal.
pub struct TermGate;

impl ConfirmationGate for TermGate {
    fn confirm(&self, prompt: &str) -> bool {
        println!("{}", prompt);
        println!("This action cannot be undone!");
        print!("Are you sure? [y/N]: ");
        if stdout().flush().is_err() {
            return false;
        }

        let mut input = String::new();
        if stdin().read_line(&mut input).is_err() {
            warn!("failed to read confirmation input, treating as cancel");
            return false;
        }

        let input = input.trim().to_lowercase();
        input == "y" || input == "yes"
    }
}

/// Confirmation already given up front (the `--force` flag).
pub struct AutoConfirm;

impl ConfirmationGate for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
