/*
[INPUT]:  Flat history record list from the backend
[OUTPUT]: Status-filtered, date-grouped views and history actions
[POS]:    Domain layer - task history browsing, retry and deletion
[UPDATE]: When grouping keys, filters or history actions change
*/

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use creator_dashboard_adapter::{HistoryRecord, HistoryStatus};
use tracing::{info, warn};

use crate::controller::{StartTask, TaskController, TaskHandle, lock};
use crate::error::{ControllerError, Result};
use crate::render::ToastLevel;
use crate::result_view::ResultView;
use crate::task::TaskId;

const UNKNOWN_DATE_LABEL: &str = "unknown date";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    #[default]
    All,
    Succeeded,
    Failed,
}

impl HistoryFilter {
    pub fn matches(self, record: &HistoryRecord) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Succeeded => record.status == HistoryStatus::Success,
            HistoryFilter::Failed => record.is_failed(),
        }
    }
}

impl FromStr for HistoryFilter {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(HistoryFilter::All),
            "succeeded" | "success" => Ok(HistoryFilter::Succeeded),
            "failed" | "error" => Ok(HistoryFilter::Failed),
            other => Err(format!(
                "unknown history filter '{other}' (expected all, succeeded or failed)"
            )),
        }
    }
}

impl fmt::Display for HistoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HistoryFilter::All => "all",
            HistoryFilter::Succeeded => "succeeded",
            HistoryFilter::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Local calendar date of a record; `None` when `created_at` is missing or unparseable
pub fn record_date(record: &HistoryRecord) -> Option<NaiveDate> {
    record.created_at_local().map(|created| created.date_naive())
}

/// Records sharing one calendar date
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryGroup<'a> {
    pub date: Option<NaiveDate>,
    pub records: Vec<&'a HistoryRecord>,
}

impl HistoryGroup<'_> {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn failed_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_failed()).count()
    }

    pub fn label(&self) -> String {
        match self.date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => UNKNOWN_DATE_LABEL.to_string(),
        }
    }
}

/// Group by local date, keeping groups and records in first-seen order
pub fn group_records<'a, I>(records: I) -> Vec<HistoryGroup<'a>>
where
    I: IntoIterator<Item = &'a HistoryRecord>,
{
    let mut groups: Vec<HistoryGroup<'a>> = Vec::new();
    for record in records {
        let date = record_date(record);
        match groups.iter_mut().find(|group| group.date == date) {
            Some(group) => group.records.push(record),
            None => groups.push(HistoryGroup {
                date,
                records: vec![record],
            }),
        }
    }
    groups
}

/// Loaded history plus the active filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryView {
    records: Vec<HistoryRecord>,
    filter: HistoryFilter,
}

impl HistoryView {
    pub fn new(records: Vec<HistoryRecord>) -> Self {
        Self {
            records,
            filter: HistoryFilter::All,
        }
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn filter(&self) -> HistoryFilter {
        self.filter
    }

    /// Switch filter without re-fetching
    pub fn set_filter(&mut self, filter: HistoryFilter) {
        self.filter = filter;
    }

    pub fn groups(&self) -> Vec<HistoryGroup<'_>> {
        let filter = self.filter;
        group_records(self.records.iter().filter(move |record| filter.matches(record)))
    }

    pub fn find(&self, id: &str) -> Option<&HistoryRecord> {
        self.records
            .iter()
            .find(|record| record.identity() == Some(id))
    }

    /// Failed records of one date, taken from the unfiltered list
    pub fn failed_on(&self, date: Option<NaiveDate>) -> Vec<&HistoryRecord> {
        self.records
            .iter()
            .filter(|record| record.is_failed() && record_date(record) == date)
            .collect()
    }

    fn replace(&mut self, records: Vec<HistoryRecord>) {
        self.records = records;
    }
}

fn retry_launch(record: &HistoryRecord) -> Option<StartTask> {
    let id = record.identity()?;
    Some(StartTask::retry(
        record.topic.clone(),
        record.content_type(),
        TaskId::from(id),
    ))
}

impl TaskController {
    /// Fetch recent records into the history view
    pub async fn load_history(&self) -> Result<usize> {
        match self.backend().history(self.history_limit()).await {
            Ok(records) => {
                let count = records.len();
                info!(count, "history loaded");
                lock(&self.history).replace(records);
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "failed to load history");
                self.surface()
                    .show_toast("Failed to load history", ToastLevel::Error);
                Err(err.into())
            }
        }
    }

    pub fn history_view(&self) -> HistoryView {
        lock(&self.history).clone()
    }

    pub fn set_history_filter(&self, filter: HistoryFilter) {
        lock(&self.history).set_filter(filter);
    }

    /// Delete one record; the list is reloaded when the backend confirms
    pub async fn delete_record(&self, id: &str) -> Result<bool> {
        let ack = match self.backend().delete_history(id).await {
            Ok(ack) => ack,
            Err(err) => {
                warn!(task_id = %id, error = %err, "delete request failed");
                self.surface()
                    .show_toast("Error while deleting", ToastLevel::Error);
                return Err(err.into());
            }
        };

        if !ack.success {
            let reason = ack.message.as_deref().unwrap_or("Delete failed");
            warn!(task_id = %id, reason = %reason, "delete rejected");
            self.surface().show_toast(reason, ToastLevel::Error);
            return Ok(false);
        }

        info!(task_id = %id, "history record deleted");
        self.surface().show_toast("Deleted", ToastLevel::Success);
        self.load_history().await?;
        Ok(true)
    }

    /// Retry a stored task under its original id
    pub fn retry_from_history(&self, id: &str) -> Result<TaskHandle> {
        let launch = {
            let history = lock(&self.history);
            history
                .find(id)
                .and_then(retry_launch)
                .ok_or_else(|| ControllerError::TaskNotFound(id.to_string()))?
        };
        self.start_task(launch)
    }

    /// Retry every failed record of one date with the batch throttle
    pub async fn retry_failed_in_group(&self, date: Option<NaiveDate>) -> Vec<TaskHandle> {
        let launches: Vec<StartTask> = {
            let history = lock(&self.history);
            history
                .failed_on(date)
                .into_iter()
                .filter_map(retry_launch)
                .collect()
        };
        if launches.is_empty() {
            return Vec::new();
        }

        info!(count = launches.len(), ?date, "retrying failed history group");
        self.surface().show_toast(
            &format!("Started retrying {} tasks", launches.len()),
            ToastLevel::Success,
        );
        self.launch_throttled(launches).await
    }

    /// Open a stored record's content in the result view
    pub fn open_history_result(&self, id: &str) -> Result<ResultView> {
        let payload = {
            let history = lock(&self.history);
            let record = history
                .find(id)
                .ok_or_else(|| ControllerError::TaskNotFound(id.to_string()))?;
            if !record.payload.has_content() {
                return Err(ControllerError::NoContent);
            }
            record.payload.clone()
        };
        let view = ResultView::from_payload(payload, Local::now());
        self.show_result(view.clone());
        Ok(view)
    }

    /// Open a stored record and publish its content again
    pub async fn retry_publish_record(&self, id: &str) -> Result<bool> {
        self.open_history_result(id)?;
        self.retry_publish().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(id: &str, status: HistoryStatus, created_at: Option<&str>) -> HistoryRecord {
        HistoryRecord {
            id: Some(id.to_string()),
            task_id: None,
            topic: format!("topic {id}"),
            status,
            content_type: None,
            created_at: created_at.map(str::to_string),
            message: None,
            payload: Default::default(),
        }
    }

    fn sample() -> Vec<HistoryRecord> {
        vec![
            record("a", HistoryStatus::Success, Some("2026-10-02T09:00:00")),
            record("b", HistoryStatus::Error, Some("2026-10-01T22:00:00")),
            record("c", HistoryStatus::Error, Some("2026-10-02T18:30:00")),
            record("d", HistoryStatus::Error, Some("2026-10-01 08:00:00")),
            record("e", HistoryStatus::Success, Some("2026-10-01T07:00:00")),
        ]
    }

    #[test]
    fn test_two_dates_make_two_groups() {
        let records = sample();
        let groups = group_records(&records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label(), "2026-10-02");
        assert_eq!(groups[0].total(), 2);
        assert_eq!(groups[0].failed_count(), 1);
        assert_eq!(groups[1].label(), "2026-10-01");
        assert_eq!(groups[1].total(), 3);
        assert_eq!(groups[1].failed_count(), 2);
    }

    #[test]
    fn test_unparseable_dates_share_one_group() {
        let records = vec![
            record("a", HistoryStatus::Success, Some("yesterday")),
            record("b", HistoryStatus::Error, None),
        ];
        let groups = group_records(&records);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].date, None);
        assert_eq!(groups[0].label(), UNKNOWN_DATE_LABEL);
        assert_eq!(groups[0].failed_count(), 1);
    }

    #[rstest]
    #[case(HistoryFilter::All, 5)]
    #[case(HistoryFilter::Succeeded, 2)]
    #[case(HistoryFilter::Failed, 3)]
    fn test_filter_without_refetch(#[case] filter: HistoryFilter, #[case] expected: usize) {
        let mut view = HistoryView::new(sample());
        view.set_filter(filter);
        let shown: usize = view.groups().iter().map(HistoryGroup::total).sum();
        assert_eq!(shown, expected);
        assert_eq!(view.records().len(), 5);
    }

    #[test]
    fn test_failed_on_ignores_active_filter() {
        let mut view = HistoryView::new(sample());
        view.set_filter(HistoryFilter::Succeeded);
        let date = NaiveDate::from_ymd_opt(2026, 10, 1);

        let failed: Vec<_> = view
            .failed_on(date)
            .into_iter()
            .filter_map(|record| record.identity())
            .collect();
        assert_eq!(failed, vec!["b", "d"]);
    }

    #[rstest]
    #[case("all", HistoryFilter::All)]
    #[case("Success", HistoryFilter::Succeeded)]
    #[case("failed", HistoryFilter::Failed)]
    #[case("error", HistoryFilter::Failed)]
    fn test_filter_parse(#[case] raw: &str, #[case] expected: HistoryFilter) {
        assert_eq!(raw.parse::<HistoryFilter>(), Ok(expected));
    }

    #[test]
    fn test_retry_launch_keeps_identity() {
        let mut stored = record("task-7", HistoryStatus::Error, None);
        stored.id = None;
        stored.task_id = Some("task-7".to_string());
        stored.content_type = Some("paper_analysis".to_string());

        let launch = retry_launch(&stored).expect("launch");
        assert_eq!(launch.existing_id, Some(TaskId::from("task-7")));
        assert_eq!(
            launch.content_type,
            Some(creator_dashboard_adapter::ContentType::PaperAnalysis)
        );
        assert_eq!(launch.topic.as_deref(), Some("topic task-7"));
    }
}
