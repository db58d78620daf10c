//! Command line definition and the pure mapping from arguments to an [`Action`].

use clap::{ArgAction, Command, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::error::UsageError;
use crate::ui::ColorMode;

#[derive(Parser, Debug)]
#[command(name = "yarnrc")]
#[command(about = "Switch between different .yarnrc files with ease and grace")]
#[command(version)]
#[command(disable_help_flag = true)]
#[command(override_usage = "yarnrc                 list all profiles
       yarnrc [name]          change yarnrc profile (uses fuzzy matching)
       yarnrc -c [name]       create a new yarnrc profile called name
       yarnrc -r [registry]   use an npm mirror")]
pub struct Cli {
    /// Profile to switch to (uses fuzzy matching)
    pub name: Option<String>,

    /// Create a new, empty profile called NAME
    #[arg(short = 'c', long = "create", value_name = "NAME", num_args = 0..=1)]
    pub create: Option<Option<String>>,

    /// Use an npm mirror in the active profile
    #[arg(short = 'r', long = "registry", value_name = "KEY", num_args = 0..=1)]
    pub registry: Option<Option<String>>,

    /// Print help
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,

    /// Print a shell completion script
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Profile store directory
    #[arg(long, value_name = "DIR", env = "YARNRC_STORE", hide_env_values = true)]
    pub store: Option<PathBuf>,

    /// Path of the active .yarnrc link
    #[arg(long, value_name = "FILE", env = "YARNRC", hide_env_values = true)]
    pub link: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// When to use colors: always, auto, never
    #[arg(long, value_name = "WHEN", value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

/// What a single invocation should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Switch(String),
    Create(String),
    SetRegistry(String),
    Help,
    Completions(Shell),
}

impl Cli {
    /// Map parsed arguments to exactly one action.
    ///
    /// `-h` wins over everything. Otherwise `-c`, `-r` and a bare name are
    /// mutually exclusive.
    pub fn action(&self) -> Result<Action, UsageError> {
        if self.help {
            return Ok(Action::Help);
        }

        let mut requested = Vec::new();
        if self.create.is_some() {
            requested.push("--create");
        }
        if self.registry.is_some() {
            requested.push("--registry");
        }
        if self.name.is_some() {
            requested.push("<name>");
        }
        if self.completions.is_some() {
            requested.push("--completions");
        }
        if requested.len() > 1 {
            return Err(UsageError::ConflictingActions(requested));
        }

        if let Some(create) = &self.create {
            return match create.as_deref() {
                Some(name) if !name.is_empty() => Ok(Action::Create(name.to_string())),
                _ => Err(UsageError::MissingProfileName),
            };
        }
        if let Some(registry) = &self.registry {
            return match registry.as_deref() {
                Some(key) if !key.is_empty() => Ok(Action::SetRegistry(key.to_string())),
                _ => Err(UsageError::MissingMirror),
            };
        }
        if let Some(shell) = self.completions {
            return Ok(Action::Completions(shell));
        }

        Ok(match &self.name {
            Some(name) => Action::Switch(name.clone()),
            None => Action::List,
        })
    }
}

/// Every flag in `args` that `command` does not define, in order.
///
/// Short flags are judged by their first letter, long flags by the part
/// before any `=`. Everything after a bare `--` is ignored.
pub fn unknown_options<S: AsRef<str>>(args: &[S], command: &Command) -> Vec<String> {
    let known_short: Vec<char> = command.get_arguments().filter_map(|a| a.get_short()).collect();
    let mut known_long: Vec<&str> = command.get_arguments().filter_map(|a| a.get_long()).collect();
    known_long.push("version");

    let mut unknown = Vec::new();
    for arg in args.iter().map(AsRef::as_ref) {
        if arg == "--" {
            break;
        }
        if let Some(long) = arg.strip_prefix("--") {
            let flag = long.split('=').next().unwrap_or_default();
            if !known_long.contains(&flag) {
                unknown.push(arg.to_string());
            }
        } else if let Some(short) = arg.strip_prefix('-') {
            match short.chars().next() {
                Some(c) if known_short.contains(&c) || c == 'V' => {}
                Some(_) => unknown.push(arg.to_string()),
                None => {}
            }
        }
    }
    unknown
}
