pub mod cli;
pub mod commands;
pub mod error;
pub mod paths;
pub mod profiles;
pub mod registry;
pub mod resolve;
pub mod switch;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
