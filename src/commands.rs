//! High-level command orchestration for the CLI.
//!
//! This module contains the handler functions for each action (list, create,
//! switch, registry). It serves as the coordination layer, interacting with:
//! - `crate::ui` for output.
//! - `crate::paths` for filesystem locations.
//! - `crate::profiles` for the profile store.
//! - `crate::resolve` for fuzzy name matching.
//! - `crate::switch` for the active link.
//! - `crate::registry` for mirror rewriting.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;
use comfy_table::Color;

use crate::cli::Cli;
use crate::paths::Paths;
use crate::profiles::{create_profile, initialize, list_profiles};
use crate::registry::{self, Mirror};
use crate::resolve::resolve;
use crate::switch::{Activation, activate, current_target, ensure_not_already_active};
use crate::ui::Ui;

/// Set up the store on first run and report what happened
pub fn init(paths: &Paths, ui: &Ui) -> Result<()> {
    let report = initialize(paths)?;
    if !report.created_store {
        return Ok(());
    }

    ui.println("Initialising yarnrc...");
    ui.println(format!("Creating {}", paths.store_dir.display()));
    if report.adopted_legacy {
        ui.println(format!(
            "Making {} the default yarnrc file",
            paths.active_link.display()
        ));
    }
    if let Some(activation) = &report.activation {
        report_activation(paths, activation, ui);
    }
    Ok(())
}

/// List all available profiles, marking the active one
pub fn list(paths: &Paths, ui: &Ui) -> Result<()> {
    let profiles = list_profiles(paths)?;

    if profiles.is_empty() {
        ui.warn("No yarnrc profiles found.");
        ui.println("Create one with:");
        ui.println(format!("  {} -c <name>", ui.bold("yarnrc")));
        return Ok(());
    }

    let current = current_target(paths);

    let mut table = ui.simple_table();
    for name in &profiles {
        let is_active = Some(name) == current.as_ref();
        let marker = if is_active {
            ui.colored_cell("*", Color::Green)
        } else {
            ui.cell(" ")
        };
        table.add_row(vec![marker, ui.cell(name)]);
    }

    ui.section("Available yarnrcs:");
    ui.newline();
    ui.println(table.to_string());

    Ok(())
}

/// Create a new, empty profile
pub fn create(paths: &Paths, name: &str, ui: &Ui) -> Result<()> {
    create_profile(paths, name)?;

    ui.ok(format!("Created yarnrc profile '{}'", name));
    ui.println(ui.dim(format!("To activate it: yarnrc {}", name)));
    Ok(())
}

/// Resolve `query` against the store and make it the active profile
pub fn switch(paths: &Paths, query: &str, ui: &Ui) -> Result<()> {
    let profiles = list_profiles(paths)?;
    let name = resolve(query, &profiles).unwrap_or_else(|| query.to_string());

    if ensure_not_already_active(paths, &name)? {
        ui.info(format!(
            "Current .yarnrc ({}) is already \"{}\" ({})",
            paths.active_link.display(),
            name,
            paths.profile_path(&name).display()
        ));
        return Ok(());
    }

    let activation = activate(paths, &name)?;
    report_activation(paths, &activation, ui);
    Ok(())
}

/// Rewrite the registry line of the active profile
pub fn set_registry(paths: &Paths, key: &str, ui: &Ui) -> Result<()> {
    let mirror: Mirror = key.parse()?;
    registry::set_registry(paths, mirror)?;

    ui.ok(format!("Using {} registry.", mirror.url()));
    Ok(())
}

fn report_activation(paths: &Paths, activation: &Activation, ui: &Ui) {
    let link_name = paths.link_name();
    if let Some(removed) = &activation.removed {
        ui.println(format!("Removing old {} ({})", link_name, removed));
    }
    ui.ok(format!(
        "Activating {} \"{}\"",
        link_name, activation.activated
    ));
}

fn mirror_help() -> String {
    let mut text = String::from("Available mirrors for yarnrc -r:\n");
    for mirror in Mirror::all() {
        text.push_str(&format!(
            "  {:<7} - {}\n",
            mirror.key(),
            mirror.description()
        ));
    }
    text.push_str(
        "\nExample:\n\n  # Creating and activating a new .yarnrc called \"work\":\n  $ yarnrc -c work\n  $ yarnrc work\n\n  # Switch between \"work\" and \"default\"\n  $ yarnrc work\n  $ yarnrc default\n\n  # Use the European npm mirror\n  $ yarnrc -r eu",
    );
    text
}

/// Print the full help text to stdout
pub fn help(ui: &Ui) {
    let help = Cli::command().after_help(mirror_help()).render_help();
    ui.println(help.to_string());
}

/// Print usage and the mirror list to stderr
pub fn usage(ui: &Ui) {
    let usage = Cli::command().render_usage();
    ui.eprintln(usage.to_string());
    ui.eprintln("");
    ui.eprintln(mirror_help().split("\n\nExample:").next().unwrap_or_default());
}

/// Print a completion script for `shell` to stdout
pub fn completions(shell: Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "yarnrc", &mut std::io::stdout());
}
