/*
[INPUT]:  History limit and task identifiers
[OUTPUT]: Persisted task records; delete acknowledgements
[POS]:    HTTP layer - task history endpoints
[UPDATE]: When history query parameters or record shape change
*/

use crate::http::{CreatorClient, Result};
use crate::types::{Ack, HistoryRecord};
use reqwest::Method;

impl CreatorClient {
    /// Fetch the most recent task records
    ///
    /// GET /api/history?limit={limit}
    pub async fn history(&self, limit: u32) -> Result<Vec<HistoryRecord>> {
        let builder = self
            .request(Method::GET, "/api/history")?
            .query(&[("limit", limit)]);
        let envelope = self.send_envelope(builder).await?;
        if !envelope.is_ok() {
            return Err(envelope.into_error());
        }
        envelope.field("data")
    }

    /// Delete one record
    ///
    /// DELETE /api/history/{task_id}
    pub async fn delete_history(&self, task_id: &str) -> Result<Ack> {
        let builder = self.request_with_segment(Method::DELETE, "/api/history", task_id)?;
        let envelope = self.send_envelope(builder).await?;
        Ok(envelope.into_ack())
    }
}
