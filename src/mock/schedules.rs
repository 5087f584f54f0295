//! History and schedule mocks. These are fixed fixtures laid out relative to
//! the current time.

use super::iso;
use crate::types::{
    Frequency, RunStatus, ScheduleStatus, WorkflowHistoryEntry, WorkflowKind, WorkflowSchedule,
};
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};

const MOCK_USER: &str = "user-1";

fn params(key: &str, value: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), Value::String(value.to_string()));
    map
}

fn history_entry(
    id: &str,
    kind: WorkflowKind,
    parameters: Map<String, Value>,
    now: DateTime<Utc>,
    started_ms_ago: i64,
    completed_ms_ago: i64,
) -> WorkflowHistoryEntry {
    WorkflowHistoryEntry {
        id: id.to_string(),
        workflow_type: kind,
        parameters,
        status: RunStatus::Completed,
        started_at: iso(now - Duration::milliseconds(started_ms_ago)),
        completed_at: Some(iso(now - Duration::milliseconds(completed_ms_ago))),
        result_url: Some(format!("/api/social-intel/workflow-result/{id}")),
        user_id: MOCK_USER.to_string(),
    }
}

/// Four completed runs from the last two days.
pub fn workflow_history(now: DateTime<Utc>) -> Vec<WorkflowHistoryEntry> {
    vec![
        history_entry(
            "wf-1234",
            WorkflowKind::NicheScout,
            params("query", "mobile gaming"),
            now,
            3_600_000,
            3_540_000,
        ),
        history_entry(
            "wf-2345",
            WorkflowKind::SeedToBlueprint,
            params("video_url", "https://youtube.com/watch?v=example123"),
            now,
            7_200_000,
            7_080_000,
        ),
        history_entry(
            "wf-3456",
            WorkflowKind::NicheScout,
            params("query", "cooking recipes"),
            now,
            86_400_000,
            86_340_000,
        ),
        history_entry(
            "wf-4567",
            WorkflowKind::SeedToBlueprint,
            params("niche", "fitness"),
            now,
            172_800_000,
            172_740_000,
        ),
    ]
}

fn schedule(
    id: String,
    kind: WorkflowKind,
    parameters: Map<String, Value>,
    frequency: Frequency,
    next_run: String,
    created: DateTime<Utc>,
) -> WorkflowSchedule {
    WorkflowSchedule {
        id,
        workflow_type: kind,
        parameters,
        frequency,
        next_run,
        status: ScheduleStatus::Scheduled,
        created_at: iso(created),
        updated_at: iso(created),
        user_id: MOCK_USER.to_string(),
    }
}

/// Three pending schedules.
pub fn scheduled_workflows(now: DateTime<Utc>) -> Vec<WorkflowSchedule> {
    vec![
        schedule(
            "sched-1234".into(),
            WorkflowKind::NicheScout,
            params("query", "gaming"),
            Frequency::Daily,
            iso(now + Duration::days(1)),
            now - Duration::days(1),
        ),
        schedule(
            "sched-2345".into(),
            WorkflowKind::SeedToBlueprint,
            params("niche", "fitness"),
            Frequency::Weekly,
            iso(now + Duration::days(7)),
            now - Duration::days(2),
        ),
        schedule(
            "sched-3456".into(),
            WorkflowKind::NicheScout,
            params("query", "cooking"),
            Frequency::Once,
            iso(now + Duration::days(3)),
            now - Duration::days(1),
        ),
    ]
}

/// The schedule the caller asked for, as if the agent had accepted it.
pub fn schedule_echo(
    kind: WorkflowKind,
    parameters: Map<String, Value>,
    frequency: Frequency,
    next_run: &str,
    now: DateTime<Utc>,
) -> WorkflowSchedule {
    schedule(
        format!("sched-{}", now.timestamp_millis()),
        kind,
        parameters,
        frequency,
        next_run.to_string(),
        now,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_ordered_newest_first() {
        let now = Utc::now();
        let history = workflow_history(now);
        assert_eq!(history.len(), 4);
        let started: Vec<&str> = history.iter().map(|h| h.started_at.as_str()).collect();
        let mut sorted = started.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(started, sorted);
        assert_eq!(
            history[0].result_url.as_deref(),
            Some("/api/social-intel/workflow-result/wf-1234")
        );
    }

    #[test]
    fn test_scheduled_workflows_are_in_the_future() {
        let now = Utc::now();
        let now_iso = iso(now);
        for s in scheduled_workflows(now) {
            assert!(s.next_run > now_iso);
            assert_eq!(s.status, ScheduleStatus::Scheduled);
        }
    }

    #[test]
    fn test_schedule_echo_keeps_request_fields() {
        let now = Utc::now();
        let echo = schedule_echo(
            WorkflowKind::SeedToBlueprint,
            params("niche", "fitness"),
            Frequency::Monthly,
            "2030-01-01T00:00:00Z",
            now,
        );
        assert_eq!(echo.id, format!("sched-{}", now.timestamp_millis()));
        assert_eq!(echo.next_run, "2030-01-01T00:00:00Z");
        assert_eq!(echo.frequency, Frequency::Monthly);
        let json = serde_json::to_value(&echo).unwrap();
        assert_eq!(json["workflow_type"], "seed-to-blueprint");
        assert_eq!(json["frequency"], "monthly");
        assert_eq!(json["status"], "scheduled");
    }
}
