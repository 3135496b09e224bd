//! Access to the golden chart configurations under `static/charts`.

use std::path::PathBuf;

use chart_query_configuration::{parse_chart_config, ChartSpec};

/// Every golden chart configuration, by name.
pub const GOLDEN_CHARTS: [&str; 4] = [
    "orders_over_time",
    "revenue_by_status",
    "null_semantics",
    "active_users",
];

/// Find the project root via the crate root provided by `cargo test`,
/// and resolve a path relative to it.
/// This depends on the convention that all our crates live in `/crates/<group>/<name>`
/// or `/crates/<name>`, and looks upwards for the workspace `static` directory.
pub fn get_path_from_project_root(relative_path: &str) -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = manifest_dir
        .ancestors()
        .find(|dir| dir.join("static").is_dir())
        .unwrap_or(&manifest_dir)
        .to_path_buf();
    root.join(relative_path)
}

/// The path of a golden chart configuration.
pub fn golden_chart_path(name: &str) -> PathBuf {
    get_path_from_project_root("static/charts").join(format!("{name}.json"))
}

/// Load and parse a golden chart configuration.
pub fn load_golden_chart(name: &str) -> anyhow::Result<ChartSpec> {
    let text = std::fs::read_to_string(golden_chart_path(name))?;
    Ok(parse_chart_config(&text)?)
}
