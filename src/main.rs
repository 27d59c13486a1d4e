use std::io::Write;

use clap::Parser;
use colored::*;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

use device_console::api::{Action, HttpApi};
use device_console::cli::{apply_overrides, Args, Command};
use device_console::config::Settings;
use device_console::render::TerminalRender;
use device_console::session::{FileStore, SessionStore};
use device_console::Console;

type AppConsole = Console<HttpApi, FileStore, TerminalRender>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = apply_overrides(settings, &args);

    let store = FileStore::open(&settings.storage.session_file)?;
    let session = SessionStore::new(store);
    let api = HttpApi::new(settings.api.base_url.clone());
    let mut console = Console::new(api, session, TerminalRender::new());

    print_banner(&settings);
    console.startup().await;

    // One-shot mode: run the trailing command and exit.
    if !args.command.is_empty() {
        let line = args.command.join(" ");
        match Command::from_str_loose(&line) {
            Ok(command) => {
                dispatch(&mut console, command).await;
            }
            Err(msg) => eprintln!("{}", msg.bright_red()),
        }
        return Ok(());
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("{} ", "device>".bright_cyan());
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Command::from_str_loose(line) {
            Ok(Command::Quit) => break,
            Ok(command) => dispatch(&mut console, command).await,
            Err(msg) => println!("{}", msg.bright_red()),
        }
    }

    Ok(())
}

async fn dispatch(console: &mut AppConsole, command: Command) {
    match command {
        Command::Register {
            device_name,
            enroll_id,
        } => console.submit_register(&device_name, &enroll_id).await,
        Command::Login { enroll_id } => console.submit_login(&enroll_id).await,
        Command::Go(view) => console.navigate(view).await,
        Command::On => console.command(Action::On).await,
        Command::Off => console.command(Action::Off).await,
        Command::Refresh => console.refresh_status().await,
        Command::Logs => console.refresh_logs().await,
        Command::Logout => console.logout().await,
        Command::Help => print_help(),
        Command::Quit => {}
    }
}

fn print_banner(settings: &Settings) {
    println!("{}", "DEVICE CONSOLE".bright_cyan().bold());
    println!(
        "{}: {}",
        "API".bright_yellow(),
        settings.api.base_url.bright_white()
    );
}

fn print_help() {
    println!("{}", "Commands:".bright_green());
    println!("  register <device-name> <enroll-id>   register a new device");
    println!("  login <enroll-id>                    open a session");
    println!("  go <welcome|register|login|control|light>");
    println!("  on | off                             switch the device");
    println!("  refresh                              re-fetch device status");
    println!("  logs                                 re-fetch the action history");
    println!("  logout                               close the session");
    println!("  help | quit");
}
