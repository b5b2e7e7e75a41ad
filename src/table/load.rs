use super::types::RouteTable;
use anyhow::Context;
use std::path::Path;
use tracing::info;

/// Parse a route table from YAML or JSON text.
///
/// YAML is a superset of JSON for the shapes used here, so `serde_yaml` reads both.
pub fn parse_table(content: &str) -> anyhow::Result<RouteTable> {
    let table: RouteTable = serde_yaml::from_str(content)?;
    Ok(table)
}

/// Load a route table from a `.yaml`/`.yml`/`.json` file.
pub fn load_table<P: AsRef<Path>>(file_path: P) -> anyhow::Result<RouteTable> {
    let path = file_path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route table {}", path.display()))?;
    // Editors truncate before writing; a watcher can observe the empty file.
    if content.trim().is_empty() {
        anyhow::bail!("route table {} is empty", path.display());
    }

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let table: RouteTable = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON route table {}", path.display()))?
    } else {
        parse_table(&content)
            .with_context(|| format!("failed to parse YAML route table {}", path.display()))?
    };

    info!(
        path = %path.display(),
        routes_count = table.routes.len(),
        placeholders_count = table.placeholders.len(),
        "Route table loaded"
    );
    Ok(table)
}
