//! Command-line interface for inspecting and exercising tenant caches.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, TenantArgs};

/// Report a command failure and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        eprintln!(
            "{}",
            serde_json::json!({ "error": err.to_string(), "causes": &chain[1..] })
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
