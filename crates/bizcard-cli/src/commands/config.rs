//! Config command - inspect and edit the JSON configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use bizcard_core::models::config::BizcardConfig;

use super::config_file;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Write a configuration file with default values
    Init(InitArgs),

    /// Print one value, e.g. "session.max_upload_count"
    Get { key: String },

    /// Change one value; VALUE is parsed as JSON, else taken as a string
    Set { key: String, value: String },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_file(config_path);
    match args.command {
        ConfigCommand::Show => {
            if !path.exists() {
                println!(
                    "{} No config file found, showing defaults.",
                    style("ℹ").blue()
                );
            }
            let config = load_or_default(&path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init(init) => {
            let output = init.output.unwrap_or(path);
            if output.exists() && !init.force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    output.display()
                );
            }
            save(&BizcardConfig::default(), &output)?;
            println!(
                "{} Created configuration file at {}",
                style("✓").green(),
                output.display()
            );
        }
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(load_or_default(&path)?)?;
            println!("{}", serde_json::to_string_pretty(lookup(&json, &key)?)?);
        }
        ConfigCommand::Set { key, value } => {
            let value = parse_value(&value);
            let mut json = serde_json::to_value(load_or_default(&path)?)?;
            assign(&mut json, &key, value.clone())?;

            let config: BizcardConfig = serde_json::from_value(json)
                .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
            save(&config, &path)?;

            println!("{} Set {} = {}", style("✓").green(), key, value);
        }
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!();
                println!("Run 'bizcard config init' to create a configuration file.");
            }
        }
    }
    Ok(())
}

fn load_or_default(path: &Path) -> anyhow::Result<BizcardConfig> {
    if path.exists() {
        Ok(BizcardConfig::from_file(path)?)
    } else {
        Ok(BizcardConfig::default())
    }
}

fn save(config: &BizcardConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Follow a dotted key path.
fn lookup<'a>(json: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

/// Replace the value at an existing dotted key path.
fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let slot = key.split('.').try_fold(json, |current, part| {
        current
            .get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })?;
    *slot = value;
    Ok(())
}
