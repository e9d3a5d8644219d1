//! JSON envelope for machine-consumable command output.

use serde::Serialize;

pub const SCHEMA_VERSION: &str = "polysite-v1";

/// Standard envelope wrapping every JSON payload the CLI prints
#[derive(Serialize)]
pub struct Envelope<T> {
    pub schema_version: &'static str,
    pub kind: &'static str,
    pub data: T,
}

pub fn envelope<T>(kind: &'static str, data: T) -> Envelope<T> {
    Envelope {
        schema_version: SCHEMA_VERSION,
        kind,
        data,
    }
}

/// Print a payload as pretty JSON on stdout
pub fn print_json<T: Serialize>(kind: &'static str, data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&envelope(kind, data))?);
    Ok(())
}
