/// Unit tests for the in-memory backend. The save protocol leans on this
/// contract: order-preserving id assignment and relationship resolution
/// against the saved step set.
#[cfg(test)]
mod tests {
    use crate::client::memory::InMemoryFlowApi;
    use crate::client::{FlowApi, IntegrationApi};
    use crate::error::Error;
    use crate::model::flow::{DqFlow, DqFlowStep, FlowStatus, StepType};

    fn mock_step(id: Option<i64>, name: &str) -> DqFlowStep {
        DqFlowStep {
            id,
            name: name.to_string(),
            description: String::new(),
            step_type: StepType::Transformation,
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
            id: None,
            name: "Backend Flow".to_string(),
            description: String::new(),
            steps,
            status: FlowStatus::Created,
            created_date: None,
            modified_date: None,
        }
    }

    #[tokio::test]
    async fn update_assigns_ids_in_step_order() {
        let api = InMemoryFlowApi::new();
        let flow = api.seed(mock_flow(vec![mock_step(Some(10), "A")]));
        let flow_id = flow.id.unwrap();

        let mut submitted = flow.clone();
        submitted.steps.push(mock_step(None, "B"));
        submitted.steps.push(mock_step(None, "C"));

        let saved = api.update_flow(flow_id, &submitted).await.unwrap();

        // position i of the response corresponds to position i of the body
        let names: Vec<&str> = saved.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(saved.steps[0].id, Some(10));
        assert!(saved.steps[1].id.is_some());
        assert!(saved.steps[2].id.is_some());
        assert_ne!(saved.steps[1].id, saved.steps[2].id);
    }

    #[tokio::test]
    async fn update_drops_relationship_ids_of_unknown_steps() {
        let api = InMemoryFlowApi::new();
        let flow = api.seed(mock_flow(vec![
            mock_step(Some(10), "A"),
            mock_step(Some(20), "B"),
        ]));
        let flow_id = flow.id.unwrap();

        let mut submitted = flow.clone();
        submitted.steps[0].successor_ids = vec![20, 99];
        submitted.steps[1].predecessor_ids = vec![10, 77];

        let saved = api.update_flow(flow_id, &submitted).await.unwrap();

        assert_eq!(saved.steps[0].successor_ids, vec![20]);
        assert_eq!(saved.steps[1].predecessor_ids, vec![10]);
    }

    #[tokio::test]
    async fn update_stamps_the_modified_date_and_keeps_creation() {
        let api = InMemoryFlowApi::new();
        let flow = api.seed(mock_flow(vec![mock_step(Some(10), "A")]));
        let flow_id = flow.id.unwrap();
        let created = flow.created_date;

        let saved = api.update_flow(flow_id, &flow).await.unwrap();

        assert_eq!(saved.created_date, created);
        assert!(saved.modified_date.is_some());
    }

    #[tokio::test]
    async fn get_flow_serves_the_stored_version() {
        let api = InMemoryFlowApi::new();
        let flow = api.seed(mock_flow(vec![mock_step(Some(10), "A")]));

        let fetched = api.get_flow(flow.id.unwrap()).await.unwrap();
        assert_eq!(fetched, flow);

        let missing = api.get_flow(999).await;
        assert!(matches!(
            missing,
            Err(Error::BackendError { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn updating_an_unknown_flow_is_a_backend_error() {
        let api = InMemoryFlowApi::new();
        let result = api.update_flow(404, &mock_flow(vec![])).await;
        assert!(matches!(
            result,
            Err(Error::BackendError { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn metadata_rows_pass_through() {
        let api = InMemoryFlowApi::new();
        api.seed_metadata(3, vec!["id".to_string(), "name".to_string()]);

        let rows = api.metadata(3).await.unwrap();
        assert_eq!(rows, vec!["id", "name"]);
    }

    #[tokio::test]
    async fn an_error_prefixed_first_row_is_a_domain_failure() {
        let api = InMemoryFlowApi::new();
        api.seed_metadata(3, vec!["Error: connection refused".to_string()]);

        let result = api.metadata(3).await;
        assert!(matches!(
            result,
            Err(Error::IntegrationMetadataError(message)) if message == "connection refused"
        ));
    }
}
