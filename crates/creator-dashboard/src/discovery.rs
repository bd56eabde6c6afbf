/*
[INPUT]:  Domain keyword or source URL
[OUTPUT]: Topic list loaded into a SelectionState
[POS]:    Execution layer - topic discovery
[UPDATE]: When discovery endpoints or failure messaging change
*/

use tracing::{info, warn};

use crate::controller::TaskController;
use crate::error::{ControllerError, Result};
use crate::render::ToastLevel;
use crate::selection::SelectionState;

impl TaskController {
    /// Fetch trending topics for `domain` into `selection`
    pub async fn discover_trending(
        &self,
        domain: &str,
        selection: &mut SelectionState,
    ) -> Result<usize> {
        let domain = domain.trim();
        match self.backend().fetch_trending_topics(domain).await {
            Ok(topics) => {
                info!(domain = %domain, count = topics.len(), "trending topics loaded");
                if topics.is_empty() {
                    self.surface().show_toast("No trending topics found", ToastLevel::Info);
                }
                let count = topics.len();
                selection.replace_topics(topics);
                Ok(count)
            }
            Err(err) => {
                warn!(domain = %domain, error = %err, "failed to fetch trending topics");
                selection.replace_topics(Vec::new());
                self.surface()
                    .show_toast("Failed to fetch trending topics", ToastLevel::Error);
                Err(err.into())
            }
        }
    }

    /// Crawl `url` and extract topics from it into `selection`
    pub async fn discover_from_url(
        &self,
        url: &str,
        selection: &mut SelectionState,
    ) -> Result<usize> {
        let url = url.trim();
        if url.is_empty() {
            self.surface().show_toast("Please enter a link", ToastLevel::Info);
            return Err(ControllerError::EmptyUrl);
        }

        match self.backend().fetch_topics_from_url(url).await {
            Ok(topics) => {
                info!(url = %url, count = topics.len(), "topics extracted from page");
                let count = topics.len();
                selection.replace_topics(topics);
                Ok(count)
            }
            Err(err) => {
                warn!(url = %url, error = %err, "failed to extract topics");
                selection.replace_topics(Vec::new());
                self.surface()
                    .show_toast("Failed to extract topics", ToastLevel::Error);
                Err(err.into())
            }
        }
    }
}
