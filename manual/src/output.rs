//! Output formatting for capability schemas.

use mancap_core::CapabilitySchema;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats a schema in the requested output format.
pub fn format_schema(schema: &CapabilitySchema, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(schema)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(schema).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(schema_to_markdown(schema)),
        OutputFormat::Table => Ok(schema_to_table(schema)),
    }
}

fn schema_to_markdown(schema: &CapabilitySchema) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", schema.command));
    out.push_str(&format!("{}\n\n", schema.description));

    if !schema.properties.is_empty() {
        out.push_str("## Properties\n\n");
        out.push_str("| Flag | Kind | Description |\n");
        out.push_str("|------|------|-------------|\n");
        for prop in &schema.properties {
            out.push_str(&format!(
                "| `{}` | {} | {} |\n",
                prop.flag,
                prop.kind.as_str(),
                prop.description.replace('\n', " "),
            ));
        }
        out.push('\n');
    }

    out
}

fn schema_to_table(schema: &CapabilitySchema) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Command: {}  Properties: {}\n",
        schema.command,
        schema.properties.len()
    ));
    out.push_str(&format!("  {}\n", schema.description.replace('\n', "\n  ")));

    if !schema.properties.is_empty() {
        out.push_str("\nProperties:\n");
        let max_flag = schema
            .properties
            .iter()
            .map(|p| p.flag.len())
            .max()
            .unwrap_or(4);

        for prop in &schema.properties {
            out.push_str(&format!(
                "  {:<flag_width$}  {:<7}  {}\n",
                prop.flag,
                prop.kind.as_str(),
                prop.description.replace('\n', " "),
                flag_width = max_flag,
            ));
        }
    }

    out
}
