#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::api::{
        CourseOffering, CourseOfferingId, GenerationReport, RunStatus, SemesterOffering,
        SemesterOfferingId,
    };
    use crate::error::RoutineError;
    use crate::remote::{GenerationOutcome, LocalRoutineApi, Placement};
    use crate::services::lifecycle::RoutineWorkflow;

    fn offering_with_courses(id: i64, courses: usize) -> SemesterOffering {
        SemesterOffering {
            id: SemesterOfferingId::new(id),
            programme_name: "BSc-CSE".to_string(),
            department_name: "CSE".to_string(),
            session_name: "2024-25".to_string(),
            semester_number: 3,
            course_offerings: (0..courses)
                .map(|i| CourseOffering {
                    id: CourseOfferingId::new(100 + i as i64),
                    subject_code: format!("CSE-30{}", i),
                    subject_name: format!("Subject {}", i),
                    is_lab: false,
                    weekly_required_slots: 3,
                    lab_group: None,
                })
                .collect(),
        }
    }

    fn workflow() -> (RoutineWorkflow, LocalRoutineApi) {
        let api = LocalRoutineApi::new();
        let workflow = RoutineWorkflow::new(Arc::new(api.clone()));
        (workflow, api)
    }

    fn draft_outcome() -> GenerationOutcome {
        GenerationOutcome::draft(
            vec![
                Placement::new(100, 5, 10, 1, 1),
                Placement::new(100, 5, 10, 1, 2),
                Placement::new(101, 6, 11, 2, 1),
            ],
            GenerationReport {
                total_blocks: 3,
                placed_blocks: 3,
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_generate_empty_scope_rejected_before_remote_call() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 0);
        api.seed_offering(offering.clone());
        // No outcome queued: a remote call would fail loudly, proving the
        // validation short-circuits first.

        let err = workflow.generate(&offering).await.unwrap_err();
        assert!(matches!(err, RoutineError::Validation { .. }));
        assert!(err.is_local());
    }

    #[tokio::test]
    async fn test_generate_draft_loads_store() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 2);
        api.seed_offering(offering.clone());
        api.push_outcome(draft_outcome());

        let run = workflow.generate(&offering).await.unwrap();
        assert_eq!(run.status, RunStatus::Draft);
        assert_eq!(run.entries.len(), 3);
        assert_eq!(workflow.store().current_run(), Some(run.id));
        assert_eq!(workflow.store().current().len(), 3);
    }

    #[tokio::test]
    async fn test_generate_failed_leaves_store_untouched() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 2);
        api.seed_offering(offering.clone());
        api.push_outcome(draft_outcome());
        api.push_outcome(GenerationOutcome::failed(GenerationReport {
            total_blocks: 3,
            placed_blocks: 1,
            unplaced_blocks: 2,
            conflicts: Some(vec!["teacher 5 unavailable on Monday".to_string()]),
            ..Default::default()
        }));

        let first = workflow.generate(&offering).await.unwrap();
        let failed = workflow.generate(&offering).await.unwrap();

        assert_eq!(failed.status, RunStatus::Failed);
        assert!(failed.entries.is_empty());
        let report = failed.meta.expect("report preserved");
        assert_eq!(report.unplaced_blocks, 2);

        // The earlier draft is still the loaded view.
        assert_eq!(workflow.store().current_run(), Some(first.id));
    }

    #[tokio::test]
    async fn test_generate_transport_failure_leaves_no_run() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 1);
        api.seed_offering(offering.clone());
        // Queue nothing: the backend refuses, standing in for a network error.

        let err = workflow.generate(&offering).await.unwrap_err();
        assert!(matches!(err, RoutineError::Remote(_)));

        let runs = workflow.list_runs(offering.id).await.unwrap();
        assert!(runs.is_empty());
        assert!(workflow.store().current_run().is_none());
    }

    #[tokio::test]
    async fn test_generate_timeout_is_distinguishable() {
        let (_, api) = workflow();
        let workflow = RoutineWorkflow::new(Arc::new(api.clone()))
            .with_generate_timeout(Duration::from_millis(20));
        let offering = offering_with_courses(1, 1);
        api.seed_offering(offering.clone());
        api.push_outcome(draft_outcome());
        api.set_generate_delay(Duration::from_secs(5));

        let err = workflow.generate(&offering).await.unwrap_err();
        assert!(matches!(err, RoutineError::GenerationTimeout { .. }));
        assert!(err.to_string().contains("still running"));
    }

    #[tokio::test]
    async fn test_commit_draft_then_second_commit_rejected() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 2);
        api.seed_offering(offering.clone());
        api.push_outcome(draft_outcome());

        let run = workflow.generate(&offering).await.unwrap();
        let committed = workflow.commit(&run).await.unwrap();
        assert_eq!(committed.status, RunStatus::Committed);
        assert!(committed.committed_at.is_some());

        let err = workflow.commit(&committed).await.unwrap_err();
        assert!(matches!(err, RoutineError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_commit_guard_rejects_terminal_states_locally() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 1);
        api.seed_offering(offering.clone());
        api.push_outcome(draft_outcome());

        let run = workflow.generate(&offering).await.unwrap();
        workflow.cancel(&run).await.unwrap();

        let cancelled = workflow.view(run.id).await.unwrap();
        let err = workflow.commit(&cancelled).await.unwrap_err();
        assert!(err.is_local());

        // Status unchanged after the rejected commit.
        let still = workflow.view(run.id).await.unwrap();
        assert_eq!(still.status, RunStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_commit_failed_run_rejected_locally() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 1);
        api.seed_offering(offering.clone());
        api.push_outcome(GenerationOutcome::failed(GenerationReport::default()));

        let failed = workflow.generate(&offering).await.unwrap();
        let err = workflow.commit(&failed).await.unwrap_err();
        assert!(matches!(err, RoutineError::InvalidTransition { .. }));
        assert!(err.is_local());

        let still = workflow.view(failed.id).await.unwrap();
        assert_eq!(still.status, RunStatus::Failed);
    }

    #[tokio::test]
    async fn test_cancel_clears_store_only_for_loaded_run() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 2);
        api.seed_offering(offering.clone());
        api.push_outcome(draft_outcome());
        api.push_outcome(draft_outcome());

        let first = workflow.generate(&offering).await.unwrap();
        let second = workflow.generate(&offering).await.unwrap();
        assert_eq!(workflow.store().current_run(), Some(second.id));

        // Cancelling the run that is not loaded keeps the view.
        workflow.cancel(&first).await.unwrap();
        assert_eq!(workflow.store().current_run(), Some(second.id));

        // Cancelling the loaded run empties the store.
        workflow.cancel(&second).await.unwrap();
        assert!(workflow.store().current_run().is_none());
        assert!(workflow.store().current().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_non_draft_rejected() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 1);
        api.seed_offering(offering.clone());
        api.push_outcome(draft_outcome());

        let run = workflow.generate(&offering).await.unwrap();
        let committed = workflow.commit(&run).await.unwrap();

        let err = workflow.cancel(&committed).await.unwrap_err();
        assert!(matches!(err, RoutineError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_delete_rejected_for_committed_allowed_for_cancelled() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 1);
        api.seed_offering(offering.clone());
        api.push_outcome(draft_outcome());
        api.push_outcome(draft_outcome());

        let first = workflow.generate(&offering).await.unwrap();
        workflow.cancel(&first).await.unwrap();
        let cancelled = workflow.view(first.id).await.unwrap();
        workflow.delete(&cancelled).await.unwrap();

        let second = workflow.generate(&offering).await.unwrap();
        let committed = workflow.commit(&second).await.unwrap();
        let err = workflow.delete(&committed).await.unwrap_err();
        assert!(matches!(err, RoutineError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_list_runs_most_recent_first() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 1);
        api.seed_offering(offering.clone());
        for _ in 0..3 {
            api.push_outcome(draft_outcome());
        }

        let a = workflow.generate(&offering).await.unwrap();
        let b = workflow.generate(&offering).await.unwrap();
        let c = workflow.generate(&offering).await.unwrap();

        let runs = workflow.list_runs(offering.id).await.unwrap();
        assert_eq!(runs.len(), 3);
        assert!(runs[0].generated_at >= runs[1].generated_at);
        assert!(runs[1].generated_at >= runs[2].generated_at);
        let ids: Vec<i64> = runs.iter().map(|r| r.id.value()).collect();
        assert!(ids.contains(&a.id.value()));
        assert!(ids.contains(&b.id.value()));
        assert!(ids.contains(&c.id.value()));
    }

    #[tokio::test]
    async fn test_view_failed_run_loads_empty_set() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 1);
        api.seed_offering(offering.clone());
        api.push_outcome(GenerationOutcome::failed(GenerationReport::default()));

        let failed = workflow.generate(&offering).await.unwrap();
        let viewed = workflow.view(failed.id).await.unwrap();

        assert_eq!(viewed.status, RunStatus::Failed);
        assert_eq!(workflow.store().current_run(), Some(failed.id));
        assert!(workflow.store().current().is_empty());
    }

    #[tokio::test]
    async fn test_committed_run_helper() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 1);
        api.seed_offering(offering.clone());
        api.push_outcome(draft_outcome());
        api.push_outcome(draft_outcome());

        assert!(workflow.committed_run(offering.id).await.unwrap().is_none());

        let first = workflow.generate(&offering).await.unwrap();
        let _second = workflow.generate(&offering).await.unwrap();
        workflow.commit(&first).await.unwrap();

        let incumbent = workflow.committed_run(offering.id).await.unwrap().unwrap();
        assert_eq!(incumbent.id, first.id);
    }

    #[tokio::test]
    async fn test_commit_rejected_while_incumbent_exists() {
        use chrono::Utc;

        use crate::api::{ScheduleRun, ScheduleRunId};

        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 1);
        api.seed_offering(offering.clone());
        api.push_outcome(draft_outcome());

        // A previously committed run already occupies the offering.
        api.insert_run(ScheduleRun {
            id: ScheduleRunId::new(50),
            semester_offering_id: offering.id,
            status: RunStatus::Committed,
            generated_at: Utc::now(),
            committed_at: Some(Utc::now()),
            meta: None,
            entries: vec![],
        });

        let run = workflow.generate(&offering).await.unwrap();
        let err = workflow.commit(&run).await.unwrap_err();
        assert!(matches!(err, RoutineError::Remote(_)));

        // Supersession is caller-driven: the incumbent is discoverable and
        // untouched.
        let incumbent = workflow.committed_run(offering.id).await.unwrap().unwrap();
        assert_eq!(incumbent.id, ScheduleRunId::new(50));
    }

    #[tokio::test]
    async fn test_generate_for_fetches_offering() {
        let (workflow, api) = workflow();
        let offering = offering_with_courses(1, 1);
        api.seed_offering(offering.clone());
        api.push_outcome(draft_outcome());

        let run = workflow.generate_for(offering.id).await.unwrap();
        assert_eq!(run.semester_offering_id, offering.id);
    }
}
