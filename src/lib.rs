use std::path::Path;

use crate::error::Result;
use crate::model::flow::DqFlow;

pub mod client;
pub mod editor;
pub mod error;
pub mod graph;
pub mod loader;
pub mod logger;
pub mod model;
pub mod report;
pub mod session;
pub mod view;

/// Loads a flow definition from a JSON file.
pub fn load_flow(file_path: impl AsRef<Path>) -> Result<DqFlow> {
    let flow: DqFlow = loader::parse_json_file(file_path)?;
    log::info!(
        "Flow '{}' parsed successfully ({} steps).",
        flow.name,
        flow.steps.len()
    );

    Ok(flow)
}
