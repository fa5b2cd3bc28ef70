use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input};

use super::{Config, IndexConfig};

#[inline]
pub fn run_interactive_config() -> Result<()> {
    println!("{}", style("🔧 Docdex Configuration Setup").bold().cyan());
    println!();

    let mut config = load_existing_config()?;

    println!("{}", style("Index Configuration").bold().yellow());
    println!("Configure the embedding index for document search.");
    println!();

    configure_index(&mut config.index)?;

    println!();
    if Confirm::new()
        .with_prompt("Save configuration?")
        .default(true)
        .interact()?
    {
        config.save().context("Failed to save configuration")?;
        println!("{}", style("✓ Configuration saved successfully!").green());

        let config_path = Config::config_file_path().context("Failed to get config file path")?;
        println!(
            "Configuration saved to: {}",
            style(config_path.display()).cyan()
        );
        println!(
            "{}",
            style("Note: changing the vector dimension requires 'docdex reindex'.").dim()
        );
    } else {
        println!("Configuration not saved.");
    }

    Ok(())
}

#[inline]
pub fn show_config() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    println!("{}", style("📋 Current Configuration").bold().cyan());
    println!();

    println!("{}", style("Index Settings:").bold().yellow());
    println!(
        "  Vector Dimension: {}",
        style(config.index.dimension).cyan()
    );

    match config.database_path() {
        Ok(path) => println!("  Database: {}", style(path.display()).cyan()),
        Err(e) => println!("  Database: {} ({})", style("Unavailable").red(), e),
    }

    let config_path = Config::config_file_path().context("Failed to get config file path")?;
    println!();
    println!("Config file: {}", style(config_path.display()).dim());

    Ok(())
}

fn load_existing_config() -> Result<Config> {
    Config::load().map_or_else(
        |_| {
            println!(
                "{}",
                style("No existing configuration found. Using defaults.").yellow()
            );
            Ok(Config::default())
        },
        |config| {
            println!("{}", style("Found existing configuration.").green());
            Ok(config)
        },
    )
}

fn configure_index(index: &mut IndexConfig) -> Result<()> {
    let dimension: usize = Input::new()
        .with_prompt("Embedding vector dimension")
        .default(index.dimension)
        .validate_with(|input: &usize| -> Result<(), &str> {
            if *input == 0 {
                Err("Dimension must be greater than 0")
            } else if *input > 4096 {
                Err("Dimension must be 4096 or less")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    index.set_dimension(dimension)?;

    Ok(())
}
