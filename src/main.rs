use clap::Parser;
use std::path::PathBuf;

use dqman_flow::graph::assembler;
use dqman_flow::model::flow::DqFlow;
use dqman_flow::model::validate::validate_flow;
use dqman_flow::view::graph::ViewGraph;
use dqman_flow::{load_flow, logger};

/// Inspect a data-quality flow file: print its graph structure and
/// optionally run client-side validation.
#[derive(Parser, Debug)]
#[command(name = "dqman-flow", version)]
struct Args {
    /// Path to a flow JSON file
    flow_file: PathBuf,

    /// Run validation and print the report
    #[arg(long)]
    validate: bool,
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = Args::parse();

    log::info!("Loading flow from '{}'...", args.flow_file.display());
    let flow = load_flow(&args.flow_file)?;

    match assembler::domain_to_view(&flow) {
        Ok(graph) => print_summary(&flow, &graph),
        Err(e) => log::warn!("No graph to print: {}", e),
    }

    if args.validate {
        let report = validate_flow(&flow);
        if report.valid {
            log::info!("Flow '{}' is valid.", flow.name);
        } else {
            log::warn!("Flow '{}' has {} validation errors:", flow.name, report.errors.len());
            for error in &report.errors {
                log::warn!("  - {}", error);
            }
        }
    }

    Ok(())
}

fn print_summary(flow: &DqFlow, graph: &ViewGraph) {
    log::info!("--- Flow Summary ---");
    log::info!("Flow: {} (id {})", flow.name, graph.flow_id);
    log::info!("Status: {:?}", flow.status);
    log::info!("Nodes: {}", graph.nodes.len());

    for node in &graph.nodes {
        log::info!(
            "  - [{}] {} ({}) stepId={}",
            node.node_id,
            node.name,
            node.step_type,
            node.step_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "new".to_string())
        );
    }

    log::info!("Connections: {}", graph.connections.len());
    for connection in &graph.connections {
        log::info!(
            "  * {} -> {}",
            connection.source_node_id,
            connection.target_node_id
        );
    }
    log::info!("--------------------");
}
