use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{list_table, output, CommandOutput};
use crate::services::DriverRegistry;

#[derive(Debug, Serialize)]
pub struct DriverListOutput {
    pub drivers: Vec<String>,
}

impl CommandOutput for DriverListOutput {
    fn to_human(&self) -> String {
        if self.drivers.is_empty() {
            return "No drivers registered.".to_string();
        }
        let mut table = list_table(&["Driver"]);
        for name in &self.drivers {
            table.add_row(vec![name.as_str()]);
        }
        format!("{table}\n\nShowing {} driver(s)", self.drivers.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(json_mode: bool) -> Result<()> {
    let registry = DriverRegistry::with_builtin_drivers();
    let out = DriverListOutput {
        drivers: registry.names(),
    };
    output(&out, json_mode);
    Ok(())
}
