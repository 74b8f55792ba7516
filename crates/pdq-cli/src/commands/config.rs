use pdq_config::PdqConfig;
use serde::Serialize;
use serde_json::Value;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ConfigEntry {
    key: String,
    value: String,
}

/// Handle `pdq config`.
pub fn handle(config: &PdqConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if flags.format == OutputFormat::Table {
        return output(&flatten(config)?, flags.format);
    }
    output(config, flags.format)
}

/// One `section.field = value` entry per leaf, in declaration order.
fn flatten(config: &PdqConfig) -> anyhow::Result<Vec<ConfigEntry>> {
    let mut entries = Vec::new();
    collect(String::new(), &serde_json::to_value(config)?, &mut entries);
    Ok(entries)
}

fn collect(prefix: String, value: &Value, entries: &mut Vec<ConfigEntry>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect(path, child, entries);
            }
        }
        Value::String(s) => entries.push(ConfigEntry {
            key: prefix,
            value: format!("{s:?}"),
        }),
        other => entries.push(ConfigEntry {
            key: prefix,
            value: other.to_string(),
        }),
    }
}
