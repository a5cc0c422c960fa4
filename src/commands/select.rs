//! Choosing which configurations to run.
use std::io::BufRead;

use crate::config::Configuration;
use crate::error::SelectError;

/// Choice that selects every configuration when given on its own.
pub const ALL: &str = "all";

/// Resolve `choices` against `configs`, keeping the order of the choices.
///
/// A lone `all` selects everything. Otherwise each choice picks the first
/// configuration whose key equals it or whose 1-based position equals it.
///
/// # Errors
///
/// Returns [`SelectError::UnknownChoice`] for the first choice that matches
/// nothing.
pub fn select<'a>(
    configs: &'a [Configuration],
    choices: &[String],
) -> Result<Vec<&'a Configuration>, SelectError> {
    if let [only] = choices
        && only == ALL
    {
        return Ok(configs.iter().collect());
    }
    choices
        .iter()
        .map(|choice| {
            find_choice(configs, choice).ok_or_else(|| SelectError::UnknownChoice(choice.clone()))
        })
        .collect()
}

/// First configuration matching `choice` by key or by 1-based number.
#[must_use]
pub fn find_choice<'a>(configs: &'a [Configuration], choice: &str) -> Option<&'a Configuration> {
    configs
        .iter()
        .enumerate()
        .find(|(i, config)| config.key() == choice || (i + 1).to_string() == choice)
        .map(|(_, config)| config)
}

/// Read one line of whitespace-separated choices.
///
/// End of input yields no choices.
///
/// # Errors
///
/// Returns [`SelectError::Input`] if reading fails.
pub fn read_choices(input: &mut dyn BufRead) -> Result<Vec<String>, SelectError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.split_whitespace().map(String::from).collect())
}

/// One `NN key` line per configuration, numbered from 1.
#[must_use]
pub fn numbered_lines(configs: &[Configuration]) -> Vec<String> {
    configs
        .iter()
        .enumerate()
        .map(|(i, config)| format!("{:2} {}", i + 1, config.key()))
        .collect()
}
