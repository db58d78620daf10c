use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::process::ExitCode;

use yarnrc::{
    cli::{Action, Cli, unknown_options},
    commands,
    error::{ProfileError, UsageError},
    paths::Paths,
    ui::Ui,
};

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err, &args),
    };
    let ui = Ui::new(cli.color, cli.no_color);

    match run(&cli, &ui) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err, &ui);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, ui: &Ui) -> Result<ExitCode> {
    let action = cli.action()?;
    match action {
        Action::Help => {
            commands::help(ui);
            return Ok(ExitCode::FAILURE);
        }
        Action::Completions(shell) => {
            commands::completions(shell);
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let paths = Paths::resolve(cli.store.clone(), cli.link.clone())?;
    commands::init(&paths, ui)?;

    match action {
        Action::List => commands::list(&paths, ui)?,
        Action::Switch(name) => commands::switch(&paths, &name, ui)?,
        Action::Create(name) => commands::create(&paths, &name, ui)?,
        Action::SetRegistry(key) => commands::set_registry(&paths, &key, ui)?,
        Action::Help | Action::Completions(_) => {}
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_failure(err: clap::Error, args: &[OsString]) -> ExitCode {
    let ui = Ui::default();

    if err.kind() == ErrorKind::DisplayVersion {
        let _ = err.print();
        return ExitCode::SUCCESS;
    }

    let args: Vec<String> = args
        .iter()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let unknown = unknown_options(&args, &Cli::command());

    if err.kind() == ErrorKind::UnknownArgument && !unknown.is_empty() {
        report_error(&UsageError::UnknownOptions(unknown).into(), &ui);
    } else {
        let _ = err.print();
        commands::usage(&ui);
    }
    ExitCode::FAILURE
}

fn report_error(err: &anyhow::Error, ui: &Ui) {
    if let Some(usage) = err.downcast_ref::<UsageError>() {
        for line in usage.to_string().lines() {
            ui.err(line);
        }
        commands::usage(ui);
    } else if let Some(profile_err) = err.downcast_ref::<ProfileError>() {
        if profile_err.is_warning() {
            ui.warn(profile_err.to_string());
        } else {
            ui.err(profile_err.to_string());
        }
        if profile_err.shows_usage() {
            commands::usage(ui);
        }
    } else {
        ui.err(format!("{:#}", err));
    }
}
