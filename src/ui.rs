// UI layer: a simple interactive menu using `dialoguer`. It only collects
// input, calls the controller and prints the resulting snapshot.

use crate::api::Dispatch;
use crate::controller::{Applied, Controller};
use crate::host::{renderable_code, Host};
use crate::state::{ErrorChannel, Field, OperationMode, Snapshot, Tone};
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Main interactive menu. Runs a select loop until the user picks "Exit".
pub fn main_menu<D: Dispatch, H: Host>(mut controller: Controller<D, H>) -> Result<()> {
    println!("{}", "The Link Shortener".bold());
    loop {
        render(&controller.snapshot(Instant::now()));

        let mode = controller.mode();
        let action = action_label(mode);
        let items = vec![
            "Reduce a link",
            "Copy short link",
            "Switch tab",
            action,
            "Exit",
        ];
        let selection = Select::new()
            .with_prompt(format!("[{}]", mode.label()))
            .items(&items)
            .default(0)
            .interact()?;
        match selection {
            0 => {
                let url = prompt("Please enter your link here")?;
                let alias = prompt("Input alias (optional)")?;
                controller.set_input(Field::Url, url);
                controller.set_input(Field::CreateAlias, alias);
                with_spinner("Reducing...", || controller.create())?;
            }
            1 => {
                if !controller.copy(Instant::now()) {
                    println!("Nothing copied.");
                }
            }
            2 => {
                let labels: Vec<&str> = OperationMode::ALL.iter().map(|m| m.label()).collect();
                let current = OperationMode::ALL.iter().position(|m| *m == mode).unwrap_or(0);
                let picked = Select::new().items(&labels).default(current).interact()?;
                if let Some(next) = OperationMode::ALL.get(picked) {
                    controller.switch_mode(*next);
                }
            }
            3 => run_tab_action(&mut controller, mode)?,
            4 => break,
            _ => {}
        }
    }
    Ok(())
}

fn action_label(mode: OperationMode) -> &'static str {
    match mode {
        OperationMode::Redirect => "Redirect",
        OperationMode::Delete => "Delete",
        OperationMode::Edit => "Update",
    }
}

fn run_tab_action<D: Dispatch, H: Host>(
    controller: &mut Controller<D, H>,
    mode: OperationMode,
) -> Result<()> {
    match mode {
        OperationMode::Redirect => {
            controller.set_input(Field::RedirectAlias, prompt("Input alias")?);
            with_spinner("Resolving...", || controller.resolve())?;
        }
        OperationMode::Delete => {
            controller.set_input(Field::DeleteAlias, prompt("Input alias")?);
            with_spinner("Deleting...", || controller.delete())?;
        }
        OperationMode::Edit => {
            controller.set_input(Field::EditCurrent, prompt("Input exist alias")?);
            controller.set_input(Field::EditNew, prompt("Input new alias")?);
            with_spinner("Updating...", || controller.rename())?;
        }
    }
    Ok(())
}

/// Free-text prompt that accepts an empty answer, so the controller can
/// report the missing field itself.
fn prompt(label: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn with_spinner(message: &'static str, op: impl FnOnce() -> Applied) -> Result<Applied> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").context("Invalid spinner template")?,
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    let applied = op();
    spinner.finish_and_clear();
    Ok(applied)
}

fn render(snapshot: &Snapshot) {
    println!();
    print_channel(&snapshot.create_channel);
    if let Some(record) = &snapshot.success {
        let link = record.display();
        let code = renderable_code(link);
        println!("Short link: {}", link.cyan());
        println!("  for {}", record.long_url);
        println!("  QR payload ({}px): {}", code.size, code.payload);
        if snapshot.copied {
            println!("  {}", "Copied!".green());
        }
    }
    println!("Tab: {}", snapshot.mode.label().bold());
    print_channel(&snapshot.shared_channel);
}

fn print_channel(channel: &ErrorChannel) {
    if let Some(message) = channel.visible() {
        match channel.tone() {
            Tone::Error => println!("{}", message.red()),
            Tone::Notice => println!("{}", message.green()),
        }
    }
}
