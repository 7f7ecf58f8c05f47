//! Parameter resolution for the update command.
//!
//! The orchestrator only ever sees fully-populated [`UpdateParams`]; how
//! missing values get filled in is decided at the CLI boundary by picking
//! one of the two resolvers.

use crate::error::{BumpError, Result};
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

/// The three inputs of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateParams {
    pub branch: String,
    pub library: String,
    pub version: String,
}

/// Turns possibly-missing CLI values into complete parameters.
pub trait ParameterResolver {
    fn resolve(
        &self,
        branch: Option<String>,
        library: Option<String>,
        version: Option<String>,
    ) -> Result<UpdateParams>;
}

/// Resolver for non-interactive use: every value must be supplied.
pub struct ArgResolver;

impl ParameterResolver for ArgResolver {
    fn resolve(
        &self,
        branch: Option<String>,
        library: Option<String>,
        version: Option<String>,
    ) -> Result<UpdateParams> {
        Ok(UpdateParams {
            branch: required(branch, "branch")?,
            library: required(library, "library")?,
            version: required(version, "newversion")?,
        })
    }
}

/// Resolver that asks a human for whatever the command line left out.
pub struct PromptResolver;

impl ParameterResolver for PromptResolver {
    fn resolve(
        &self,
        branch: Option<String>,
        library: Option<String>,
        version: Option<String>,
    ) -> Result<UpdateParams> {
        Ok(UpdateParams {
            branch: supplied_or_prompt(branch, "Branch name to check")?,
            library: supplied_or_prompt(library, "Library to update")?,
            version: supplied_or_prompt(version, "New version")?,
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(BumpError::Config(format!(
            "Missing required parameter: {}",
            name
        ))),
    }
}

fn supplied_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => ask(prompt),
    }
}

fn ask(prompt: &str) -> Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("a value is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value)
}
