//! Render target: the display surface the control flow writes into.
//!
//! The flow never touches the terminal directly — it talks to [`Render`],
//! which keeps the state machine testable against a recording fake.

use colored::*;

use crate::api::{DeviceStatus, LogEntry};
use crate::views::{NavState, View};

/// Which flow a busy indicator belongs to. A busy flow drops duplicate
/// submissions until its request resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Register,
    Login,
    Command,
}

/// Where a user-visible message lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSlot {
    Register,
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

pub trait Render {
    /// Switch the visible view and repaint the navigation chrome.
    fn show_view(&mut self, view: View, nav: NavState);
    /// Repaint the identity panel; `None` clears a field.
    fn identity(&mut self, device_name: Option<&str>, enroll_id: Option<&str>);
    fn status(&mut self, status: &DeviceStatus);
    /// Replace the displayed log table wholesale.
    fn logs(&mut self, entries: &[LogEntry]);
    fn message(&mut self, slot: MessageSlot, severity: Severity, text: &str);
    fn clear_message(&mut self, slot: MessageSlot);
    fn set_busy(&mut self, flow: Flow, busy: bool);
    /// Clear the registration form fields (success path only).
    fn reset_register_form(&mut self);
}

// ---------------------------------------------------------------------------
// TerminalRender
// ---------------------------------------------------------------------------

/// Renders into the terminal with colored output.
#[derive(Debug, Default)]
pub struct TerminalRender;

impl TerminalRender {
    pub fn new() -> Self {
        Self
    }
}

impl Render for TerminalRender {
    fn show_view(&mut self, view: View, nav: NavState) {
        println!("{}", "=".repeat(50).bright_blue());
        println!(
            "{}: {}",
            "View".bright_yellow(),
            view.to_string().bright_white().bold()
        );
        let links: Vec<String> = View::ALL
            .iter()
            .map(|v| {
                if *v == nav.active {
                    format!("[{}]", v).bright_cyan().to_string()
                } else {
                    v.to_string().normal().to_string()
                }
            })
            .collect();
        let mut line = links.join("  ");
        if nav.logout_visible {
            line.push_str(&format!("  {}", "logout".bright_red()));
        }
        println!("{}", line);
    }

    fn identity(&mut self, device_name: Option<&str>, enroll_id: Option<&str>) {
        println!(
            "{}: {}",
            "Device".bright_yellow(),
            device_name.unwrap_or("—")
        );
        println!(
            "{}: {}",
            "Enroll ID".bright_yellow(),
            enroll_id.unwrap_or("—")
        );
    }

    fn status(&mut self, status: &DeviceStatus) {
        let styled = match status.status.as_str() {
            "on" => status.status.bright_green().bold(),
            "off" => status.status.bright_red().bold(),
            other => other.bright_white(),
        };
        println!("{}: {}", "Status".bright_yellow(), styled);
        println!("{}: {}", "Last value".bright_yellow(), status.last_value);
    }

    fn logs(&mut self, entries: &[LogEntry]) {
        println!("{}", "-".repeat(50).bright_blue());
        if entries.is_empty() {
            println!("{}", "No recorded actions.".bright_black());
        }
        for entry in entries {
            println!(
                "{:<20} {}",
                entry.action.bright_white(),
                entry.timestamp.bright_black()
            );
        }
        println!("{}", "-".repeat(50).bright_blue());
    }

    fn message(&mut self, _slot: MessageSlot, severity: Severity, text: &str) {
        match severity {
            Severity::Success => println!("{}", text.bright_green()),
            Severity::Error => println!("{}", text.bright_red()),
        }
    }

    fn clear_message(&mut self, _slot: MessageSlot) {
        // The terminal keeps scrollback; clearing a slot repaints nothing.
    }

    fn set_busy(&mut self, _flow: Flow, _busy: bool) {
        // No buttons to disable in a line-oriented terminal.
    }

    fn reset_register_form(&mut self) {
        // Form fields only exist per submitted command line.
    }
}

// ---------------------------------------------------------------------------
// Recording fake for flow tests
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::nav_state;

    #[test]
    fn terminal_render_does_not_panic() {
        let mut render = TerminalRender::new();
        render.show_view(View::Control, nav_state(View::Control, true));
        render.identity(Some("kitchen-lamp"), Some("ENR-42"));
        render.status(&DeviceStatus {
            status: "on".to_string(),
            last_value: "17".to_string(),
        });
        render.logs(&[LogEntry {
            action: "turn-on".to_string(),
            timestamp: "2024-03-01T10:00:00Z".to_string(),
        }]);
        render.logs(&[]);
        render.message(MessageSlot::Register, Severity::Error, "nope");
        render.message(MessageSlot::Login, Severity::Success, "ok");
        render.clear_message(MessageSlot::Login);
        render.set_busy(Flow::Command, true);
        render.reset_register_form();
    }

    #[test]
    fn recording_render_captures_order() {
        use recording::{Op, RecordingRender};

        let mut render = RecordingRender::new();
        render.show_view(View::Login, nav_state(View::Login, false));
        render.message(MessageSlot::Login, Severity::Error, "Enroll ID not found.");

        assert_eq!(render.ops.len(), 2);
        assert_eq!(render.last_view(), Some(View::Login));
        assert!(matches!(render.ops[1], Op::Message(MessageSlot::Login, Severity::Error, _)));
    }
}
