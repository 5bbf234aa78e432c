//! Schema Export Tool
//!
//! Writes the JSON Schema of the workflow definition file format, for editor
//! completion and validation of `states:` documents.

use cim_workflow::WorkflowDefinition;
use schemars::schema_for;
use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "schemas/workflow-definition.schema.json".to_string());

    let schema = schema_for!(WorkflowDefinition);
    let json = serde_json::to_string_pretty(&schema)?;

    if let Some(parent) = Path::new(&out).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&out, json)?;
    println!("Wrote workflow definition schema to {out}");
    Ok(())
}
