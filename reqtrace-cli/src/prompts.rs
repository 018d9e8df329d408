use anyhow::Result;
use colored::Colorize;
use inquire::validator::Validation;
use inquire::{CustomType, Text};
use std::path::PathBuf;

use reqtrace_core::{Resolver, ResolverError};

/// Resolves ambiguities by asking on the console
#[derive(Debug, Default)]
pub struct ConsoleResolver {
    announced: bool,
}

impl Resolver for ConsoleResolver {
    fn notify_multiple_parents(&mut self, ids: &[&str]) {
        println!("{}", "The following requirements have multiple parents:".yellow());
        for id in ids {
            println!("\t{}", id);
        }
    }

    fn select_text(&mut self, id: &str, candidates: &[String]) -> Result<usize, ResolverError> {
        if !self.announced {
            println!(
                "{}",
                "The following requirements have multiple texts. Please select which text to use."
                    .yellow()
            );
            self.announced = true;
        }

        println!("\n\t{}:", id.bold());
        for (i, text) in candidates.iter().enumerate() {
            println!("\t\t{}: {}", i + 1, text);
        }

        let count = candidates.len();
        let choice = CustomType::<usize>::new("Selected Text Number:")
            .with_error_message("Please type a number")
            .with_validator(move |choice: &usize| {
                if (1..=count).contains(choice) {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid("Please select a valid choice.".into()))
                }
            })
            .prompt()?;

        Ok(choice)
    }
}

/// Prompts for the export filename
pub fn prompt_export_path() -> Result<PathBuf> {
    let name = Text::new("Choose a filename for export:")
        .with_validator(|name: &str| {
            if name.trim().is_empty() {
                Ok(Validation::Invalid("Filename cannot be empty".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()?;

    Ok(PathBuf::from(name.trim()))
}
