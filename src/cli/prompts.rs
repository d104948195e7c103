//! Interactive prompts using dialoguer

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::pipeline::is_data_file;

const DEFAULT_CHOICE: &str = "Use the default dataset";
const OTHER_CHOICE: &str = "Enter another path...";

/// Data files directly inside `dir`, sorted by name
pub fn list_data_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_data_file(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Expand a leading `~` to the home directory
pub fn expand_home(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    if trimmed == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(trimmed)
}

/// Let the user pick a dataset. `None` means the default dataset.
pub fn select_dataset(dir: &Path) -> Result<Option<PathBuf>> {
    let files = list_data_files(dir).unwrap_or_default();

    let mut items: Vec<String> = vec![DEFAULT_CHOICE.to_string()];
    items.extend(files.iter().map(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| p.display().to_string())
    }));
    items.push(OTHER_CHOICE.to_string());

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a dataset")
        .items(&items)
        .default(0)
        .interact()?;

    if choice == 0 {
        Ok(None)
    } else if choice <= files.len() {
        Ok(Some(files[choice - 1].clone()))
    } else {
        let raw: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Path to a CSV or Parquet file")
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                let path = expand_home(input);
                if !path.exists() {
                    Err(format!("File not found: {}", path.display()))
                } else if !is_data_file(&path) {
                    Err("Only .csv and .parquet files are supported".to_string())
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(Some(expand_home(&raw)))
    }
}

/// Ask whether the correlation heatmap should be drawn
pub fn confirm_heatmap(default: bool) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Show the correlation heatmap?")
        .default(default)
        .interact()?;
    Ok(confirmed)
}
