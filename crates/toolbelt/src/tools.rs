use crate::output::print_json;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use serde::Serialize;
use toolbelt_core::ToolKey;

#[derive(Debug, clap::Args, Clone)]
pub struct ToolsOptions {
    /// Show a single tool by key (e.g. "base64", "json_yaml")
    #[arg(short, long)]
    pub tool: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ToolEntry {
    key: &'static str,
    group: &'static str,
    title: &'static str,
    description: &'static str,
    slots: &'static [&'static str],
}

fn entries(keys: impl IntoIterator<Item = ToolKey>) -> Vec<ToolEntry> {
    keys.into_iter()
        .map(|key| ToolEntry {
            key: key.as_str(),
            group: key.group().title(),
            title: key.title(),
            description: key.description(),
            slots: key.slots(),
        })
        .collect()
}

pub async fn run(options: ToolsOptions, global: crate::Global) -> Result<()> {
    let entries = match options.tool {
        Some(key) => {
            let key: ToolKey = key.parse().map_err(Error::from)?;
            entries([key])
        }
        None => entries(ToolKey::ALL),
    };

    if global.verbose {
        eprintln!("{} tool(s)", entries.len());
    }

    if options.json {
        return print_json(&entries);
    }

    println!("\n{}\n", "TOOLS".bright_yellow().bold());

    let mut table = new_table();
    table.add_row(prettytable::row!["Group", "Key", "Title", "Description"]);
    for entry in &entries {
        table.add_row(prettytable::row![
            entry.group,
            entry.key,
            entry.title,
            entry.description
        ]);
    }
    table.printstd();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_cover_registry() {
        let entries = entries(ToolKey::ALL);
        assert_eq!(entries.len(), ToolKey::ALL.len());
        assert_eq!(entries[0].key, "base64");
        assert_eq!(entries[0].group, "Encoders");
        assert_eq!(entries[13].key, "hmac");
    }

    #[test]
    fn test_unknown_tool_key_maps_to_shell_error() {
        let err = Error::from("base32".parse::<ToolKey>().unwrap_err());
        assert_eq!(err.to_string(), "Unknown tool: base32");
    }
}
