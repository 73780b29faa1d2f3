/// Unit tests for the client-side flow validator.
#[cfg(test)]
mod tests {
    use crate::model::flow::{DqFlow, DqFlowStep, FlowStatus, StepType};
    use crate::model::validate::validate_flow;

    fn mock_step(id: i64, name: &str, step_type: StepType) -> DqFlowStep {
        DqFlowStep {
            id: Some(id),
            name: name.to_string(),
            description: String::new(),
            step_type,
            is_initial: None,
            is_final: None,
            successor_ids: vec![],
            predecessor_ids: vec![],
            pos_x: None,
            pos_y: None,
            integration_id: None,
            rule_id: None,
            transformation_id: None,
        }
    }

    fn mock_flow(steps: Vec<DqFlowStep>) -> DqFlow {
        DqFlow {
            id: Some(1),
            name: "Validation Flow".to_string(),
            description: String::new(),
            steps,
            status: FlowStatus::Created,
            created_date: None,
            modified_date: None,
        }
    }

    /// A minimal flow that passes every rule: source -> sink, both with
    /// their references and boundary flags set.
    fn valid_flow() -> DqFlow {
        let mut source = mock_step(10, "Load", StepType::DataSource);
        source.is_initial = Some(true);
        source.integration_id = Some(1);
        source.successor_ids = vec![20];

        let mut sink = mock_step(20, "Write", StepType::DataSink);
        sink.is_final = Some(true);
        sink.integration_id = Some(2);
        sink.predecessor_ids = vec![10];

        mock_flow(vec![source, sink])
    }

    #[test]
    fn a_well_formed_flow_is_valid() {
        let report = validate_flow(&valid_flow());
        assert!(report.valid, "unexpected errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn an_empty_flow_is_rejected_outright() {
        let report = validate_flow(&mock_flow(vec![]));
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["Flow must have at least one step"]);
    }

    #[test]
    fn sources_and_sinks_need_an_integration() {
        let mut flow = valid_flow();
        flow.steps[0].integration_id = None;

        let report = validate_flow(&flow);
        assert!(!report.valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("\"Load\"") && e.contains("no integration"))
        );
    }

    #[test]
    fn rule_steps_need_a_rule() {
        let mut rule = mock_step(30, "Null check", StepType::DqRule);
        rule.predecessor_ids = vec![10];
        rule.successor_ids = vec![20];

        let mut flow = valid_flow();
        flow.steps[0].successor_ids = vec![30];
        flow.steps[1].predecessor_ids = vec![30];
        flow.steps.push(rule);

        let report = validate_flow(&flow);
        assert!(!report.valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("\"Null check\"") && e.contains("no rule"))
        );
    }

    #[test]
    fn unflagged_disconnected_steps_are_flagged_both_ways() {
        let step = mock_step(10, "Orphan", StepType::Transformation);
        let report = validate_flow(&mock_flow(vec![step]));

        assert!(!report.valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("not marked as initial"))
        );
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("not marked as final"))
        );
    }

    #[test]
    fn a_step_cannot_be_both_boundaries_in_a_multi_step_flow() {
        let mut flow = valid_flow();
        flow.steps[0].is_final = Some(true);

        let report = validate_flow(&flow);
        assert!(!report.valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("cannot be both initial and final"))
        );
    }

    #[test]
    fn missing_boundary_steps_are_reported() {
        let mut flow = valid_flow();
        flow.steps[0].is_initial = None;
        flow.steps[1].is_final = None;

        let report = validate_flow(&flow);
        assert!(!report.valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("at least one initial step"))
        );
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("at least one final step"))
        );
    }
}
