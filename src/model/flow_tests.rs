/// Wire-format tests for the domain model. The backend speaks camelCase
/// JSON with spaced step-type names; both directions have to match it
/// exactly or saved flows corrupt silently.
#[cfg(test)]
mod tests {
    use crate::model::flow::{DqFlow, DqFlowStep, FlowStatus, StepType};

    #[test]
    fn deserializes_the_backend_wire_format() {
        let json = r#"{
            "id": 7,
            "name": "Customer Quality",
            "description": "Checks customer master data",
            "status": "CREATED",
            "createdDate": "2025-08-01T09:30:00+02:00",
            "modifiedDate": "2025-08-02T10:00:00Z",
            "steps": [
                {
                    "id": 10,
                    "name": "Load customers",
                    "description": "",
                    "type": "DATA SOURCE",
                    "isInitial": true,
                    "successorIds": [20],
                    "predecessorIds": [],
                    "posX": 100,
                    "posY": 100,
                    "integrationId": 3
                },
                {
                    "name": "Null check",
                    "type": "DQ RULE",
                    "ruleId": 5
                }
            ]
        }"#;

        let flow: DqFlow = serde_json::from_str(json).unwrap();

        assert_eq!(flow.id, Some(7));
        assert_eq!(flow.status, FlowStatus::Created);
        assert!(flow.created_date.is_some());
        assert_eq!(flow.steps.len(), 2);

        let source = &flow.steps[0];
        assert_eq!(source.step_type, StepType::DataSource);
        assert_eq!(source.is_initial, Some(true));
        assert_eq!(source.successor_ids, vec![20]);
        assert_eq!(source.integration_id, Some(3));
        assert_eq!(source.pos_x, Some(100));

        // the new step: no id yet, absent lists default to empty
        let rule = &flow.steps[1];
        assert_eq!(rule.id, None);
        assert_eq!(rule.step_type, StepType::DqRule);
        assert_eq!(rule.description, "");
        assert!(rule.successor_ids.is_empty());
        assert!(rule.predecessor_ids.is_empty());
        assert_eq!(rule.rule_id, Some(5));
    }

    #[test]
    fn unknown_step_types_are_tolerated() {
        let json = r#"{"name": "s", "type": "SOMETHING NEW"}"#;
        let step: DqFlowStep = serde_json::from_str(json).unwrap();
        assert_eq!(step.step_type, StepType::Unknown);
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_fields() {
        let step = DqFlowStep {
            id: None,
            name: "Write results".to_string(),
            description: "sink".to_string(),
            step_type: StepType::DataSink,
            is_initial: None,
            is_final: Some(true),
            successor_ids: vec![],
            predecessor_ids: vec![10],
            pos_x: Some(400),
            pos_y: None,
            integration_id: Some(2),
            rule_id: None,
            transformation_id: None,
        };

        let value = serde_json::to_value(&step).unwrap();

        assert_eq!(value["type"], "DATA SINK");
        assert_eq!(value["isFinal"], true);
        assert_eq!(value["predecessorIds"][0], 10);
        assert_eq!(value["posX"], 400);
        assert_eq!(value["integrationId"], 2);
        // absent optionals must not appear on the wire
        assert!(value.get("id").is_none());
        assert!(value.get("isInitial").is_none());
        assert!(value.get("ruleId").is_none());
    }

    #[test]
    fn status_round_trips_through_its_wire_names() {
        for (status, name) in [
            (FlowStatus::Created, "CREATED"),
            (FlowStatus::Validated, "VALIDATED"),
            (FlowStatus::Production, "PRODUCTION"),
            (FlowStatus::Archived, "ARCHIVED"),
        ] {
            assert_eq!(serde_json::to_value(status).unwrap(), name);
            assert_eq!(
                serde_json::from_value::<FlowStatus>(name.into()).unwrap(),
                status
            );
        }
    }

    #[test]
    fn detects_unpersisted_steps() {
        let json = r#"{
            "name": "f",
            "status": "CREATED",
            "steps": [
                {"id": 1, "name": "a", "type": "DATA SOURCE"},
                {"name": "b", "type": "DATA SINK"}
            ]
        }"#;
        let mut flow: DqFlow = serde_json::from_str(json).unwrap();

        assert!(flow.has_unpersisted_steps());
        flow.steps[1].id = Some(2);
        assert!(!flow.has_unpersisted_steps());
    }
}
