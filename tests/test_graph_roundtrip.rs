use dqman_flow::graph::assembler::{domain_to_view, view_to_domain};
use dqman_flow::model::flow::{DqFlow, FlowStatus, StepType};

/// A persisted three-step flow as the backend would serve it.
const FLOW_JSON: &str = r#"{
    "id": 1,
    "name": "Customer Quality",
    "description": "Checks customer master data",
    "status": "VALIDATED",
    "createdDate": "2025-08-01T09:30:00+02:00",
    "modifiedDate": "2025-08-05T16:45:00+02:00",
    "steps": [
        {
            "id": 10,
            "name": "Load customers",
            "description": "Reads the customer table",
            "type": "DATA SOURCE",
            "isInitial": true,
            "successorIds": [20],
            "predecessorIds": [],
            "posX": 100,
            "posY": 100,
            "integrationId": 3
        },
        {
            "id": 20,
            "name": "Null check",
            "description": "Mandatory fields must be present",
            "type": "DQ RULE",
            "successorIds": [30],
            "predecessorIds": [10],
            "posX": 400,
            "posY": 100,
            "ruleId": 5
        },
        {
            "id": 30,
            "name": "Write report",
            "description": "Stores the result set",
            "type": "DATA SINK",
            "isFinal": true,
            "successorIds": [],
            "predecessorIds": [20],
            "posX": 700,
            "posY": 100,
            "integrationId": 4
        }
    ]
}"#;

#[test]
fn test_backend_flow_converts_to_a_complete_graph() {
    let flow: DqFlow = serde_json::from_str(FLOW_JSON).unwrap();
    assert_eq!(flow.status, FlowStatus::Validated);

    let graph = domain_to_view(&flow).unwrap();

    assert_eq!(graph.flow_id, 1);
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.connections.len(), 2);

    // boundary flags determine the port counts
    let source = &graph.nodes[0];
    assert_eq!(source.step_type, StepType::DataSource);
    assert_eq!((source.inputs, source.outputs), (0, 1));

    let sink = &graph.nodes[2];
    assert_eq!((sink.inputs, sink.outputs), (1, 0));

    // connections follow the step order: 0 -> 1 -> 2
    assert_eq!(graph.connections[0].source_node_id, 0);
    assert_eq!(graph.connections[0].target_node_id, 1);
    assert_eq!(graph.connections[1].source_node_id, 1);
    assert_eq!(graph.connections[1].target_node_id, 2);
}

#[test]
fn test_round_trip_reproduces_the_persisted_flow() {
    let flow: DqFlow = serde_json::from_str(FLOW_JSON).unwrap();

    let graph = domain_to_view(&flow).unwrap();
    let rebuilt = view_to_domain(&graph, &flow);

    assert_eq!(rebuilt.id, flow.id);
    assert_eq!(rebuilt.name, flow.name);
    assert_eq!(rebuilt.status, flow.status);
    assert_eq!(rebuilt.created_date, flow.created_date);

    for (original, roundtripped) in flow.steps.iter().zip(rebuilt.steps.iter()) {
        assert_eq!(roundtripped.id, original.id);
        assert_eq!(roundtripped.name, original.name);
        assert_eq!(roundtripped.step_type, original.step_type);
        assert_eq!(roundtripped.successor_ids, original.successor_ids);
        assert_eq!(roundtripped.predecessor_ids, original.predecessor_ids);
        assert_eq!(roundtripped.integration_id, original.integration_id);
        assert_eq!(roundtripped.rule_id, original.rule_id);
    }
}

#[test]
fn test_rebuilt_flows_serialize_in_the_backend_wire_format() {
    let flow: DqFlow = serde_json::from_str(FLOW_JSON).unwrap();
    let rebuilt = view_to_domain(&domain_to_view(&flow).unwrap(), &flow);

    let value = serde_json::to_value(&rebuilt).unwrap();

    assert_eq!(value["status"], "VALIDATED");
    assert_eq!(value["steps"][0]["type"], "DATA SOURCE");
    assert_eq!(value["steps"][0]["successorIds"][0], 20);
    assert_eq!(value["steps"][1]["predecessorIds"][0], 10);
    assert_eq!(value["steps"][1]["ruleId"], 5);
    assert_eq!(value["steps"][2]["isFinal"], true);
}
