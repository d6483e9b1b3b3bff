//! Command implementations for ckv-cli

use std::collections::BTreeMap;
use std::path::Path;

use ckv::diff::{self, LineChange};
use ckv::{ConfigFile, Document, ParseOptions};
use colored::Colorize;

use crate::error::{CliError, Result};

pub fn run_get(file: &Path, key: &str, options: ParseOptions) -> Result<()> {
    let config = ConfigFile::with_options(file, options);
    let value = config
        .get_value_for_key(key)
        .map_err(|e| CliError::ckv(file, e))?;
    println!("{value}");
    Ok(())
}

pub fn run_set(
    file: &Path,
    key: &str,
    value: &str,
    dry_run: bool,
    options: ParseOptions,
) -> Result<()> {
    let config = ConfigFile::with_options(file, options);

    if dry_run {
        let before = config.load().map_err(|e| CliError::ckv(file, e))?;
        let mut after = before.clone();
        after
            .set_value(key, value)
            .map_err(|e| CliError::ckv(file, e))?;
        print_diff(file, &before, &after);
        return Ok(());
    }

    let edit = config
        .set_value_for_key(key, value)
        .map_err(|e| CliError::ckv(file, e))?;
    if edit.is_noop() {
        println!("{} {key}", "unchanged".yellow());
    } else {
        println!("{} {key} (line {})", "updated".green(), edit.line());
    }
    Ok(())
}

pub fn run_remove(file: &Path, key: &str, dry_run: bool, options: ParseOptions) -> Result<()> {
    let config = ConfigFile::with_options(file, options);

    if dry_run {
        let before = config.load().map_err(|e| CliError::ckv(file, e))?;
        let mut after = before.clone();
        after.remove(key).map_err(|e| CliError::ckv(file, e))?;
        print_diff(file, &before, &after);
        return Ok(());
    }

    let edit = config.remove_key(key).map_err(|e| CliError::ckv(file, e))?;
    println!(
        "{} {key} ({})",
        "removed".green(),
        plural(edit.span.len(), "line")
    );
    Ok(())
}

pub fn run_dump(file: &Path, json: bool, options: ParseOptions) -> Result<()> {
    let config = ConfigFile::with_options(file, options);

    if json {
        let map: BTreeMap<String, String> = config
            .import_to_map()
            .map_err(|e| CliError::ckv(file, e))?
            .into_iter()
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    let doc = config.load().map_err(|e| CliError::ckv(file, e))?;
    for (key, value) in doc.leaves() {
        println!("{} = {}", key.cyan(), value);
    }
    Ok(())
}

pub fn run_check(file: &Path, options: ParseOptions) -> Result<()> {
    let config = ConfigFile::with_options(file, options);
    let doc = config.load().map_err(|e| CliError::ckv(file, e))?;
    println!(
        "{} {} ({} values, {} lines)",
        "ok".green().bold(),
        file.display(),
        doc.leaves().len(),
        doc.line_count()
    );
    Ok(())
}

fn print_diff(file: &Path, before: &Document, after: &Document) {
    let (old, new) = (before.render(), after.render());
    let changes = diff::preview(&old, &new);
    if changes.is_empty() {
        println!("No changes");
        return;
    }

    let removed = changes
        .iter()
        .filter(|c| matches!(c, LineChange::Removed { .. }))
        .count();
    let added = changes.len() - removed;

    let diff = diff::unified(&old, &new, &file.display().to_string());
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
    println!(
        "{} {} removed, {} added",
        "dry run:".yellow(),
        plural(removed, "line"),
        plural(added, "line")
    );
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
