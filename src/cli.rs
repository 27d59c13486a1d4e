use clap::Parser;

use crate::config::Settings;
use crate::views::View;

#[derive(Parser)]
#[command(name = "device-console")]
#[command(version = "1.2.0")]
#[command(about = "Interactive terminal client for a remote IoT device-control API")]
pub struct Args {
    /// Base URL of the remote API (overrides the settings file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to a TOML settings file
    #[arg(long)]
    pub config: Option<String>,

    /// Path of the session file (overrides the settings file)
    #[arg(long)]
    pub session_file: Option<String>,

    /// One-shot command to run instead of the interactive prompt
    /// (e.g. `device-console login ENR-42`)
    #[arg(trailing_var_arg = true)]
    pub command: Vec<String>,
}

/// Apply CLI overrides on top of loaded settings: flags win over the file,
/// the file wins over defaults.
pub fn apply_overrides(mut settings: Settings, args: &Args) -> Settings {
    if let Some(base_url) = &args.base_url {
        settings.api.base_url = base_url.clone();
    }
    if let Some(session_file) = &args.session_file {
        settings.storage.session_file = session_file.clone();
    }
    settings
}

// ---------------------------------------------------------------------------
// Prompt commands
// ---------------------------------------------------------------------------

/// One typed line at the prompt. Missing form fields parse as empty strings
/// so the flow's own validation produces the inline message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register { device_name: String, enroll_id: String },
    Login { enroll_id: String },
    Go(View),
    On,
    Off,
    Refresh,
    Logs,
    Logout,
    Help,
    Quit,
}

impl Command {
    pub fn from_str_loose(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or_else(|| "Empty command".to_string())?;

        match head.to_lowercase().as_str() {
            "register" => Ok(Command::Register {
                device_name: words.next().unwrap_or_default().to_string(),
                enroll_id: words.next().unwrap_or_default().to_string(),
            }),
            "login" => Ok(Command::Login {
                enroll_id: words.next().unwrap_or_default().to_string(),
            }),
            "go" | "view" => {
                let name = words.next().unwrap_or_default();
                View::from_str_loose(name).map(Command::Go)
            }
            "on" => Ok(Command::On),
            "off" => Ok(Command::Off),
            "refresh" | "status" => Ok(Command::Refresh),
            "logs" => Ok(Command::Logs),
            "logout" => Ok(Command::Logout),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
