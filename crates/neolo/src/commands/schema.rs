//! Schema command: JSON Schema of the `analyze --json` output.

use clap::Args;
use neolo_core::report::StatsReport;
use tracing::instrument;

/// Arguments for the `schema` subcommand.
#[derive(Args, Debug, Default)]
pub struct SchemaArgs {}

/// Print the report schema.
#[instrument(name = "cmd_schema", skip_all)]
pub fn cmd_schema(_args: SchemaArgs) -> anyhow::Result<()> {
    let schema = schemars::schema_for!(StatsReport);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_names_report_sections() {
        let schema = serde_json::to_value(schemars::schema_for!(StatsReport)).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for key in ["basic", "neologisms", "msttr", "mltd", "hdd", "hapax"] {
            assert!(properties.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn cmd_schema_succeeds() {
        assert!(cmd_schema(SchemaArgs::default()).is_ok());
    }
}
