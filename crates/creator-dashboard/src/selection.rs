/*
[INPUT]:  Discovered topics and user toggles
[OUTPUT]: Ordered list of selected topic titles for batch generation
[POS]:    Domain layer - topic discovery selection
[UPDATE]: When selection rules change
*/

use creator_dashboard_adapter::TopicSuggestion;

/// Discovered topics plus which of them are selected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    topics: Vec<TopicSuggestion>,
    selected: Vec<bool>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a new topic list; any previous selection is dropped
    pub fn replace_topics(&mut self, topics: Vec<TopicSuggestion>) {
        self.selected = vec![false; topics.len()];
        self.topics = topics;
    }

    pub fn topics(&self) -> &[TopicSuggestion] {
        &self.topics
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Flip one topic; returns the new state, or `None` for an unknown index
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let slot = self.selected.get_mut(index)?;
        *slot = !*slot;
        Some(*slot)
    }

    /// Select everything, or clear when everything is already selected
    pub fn toggle_all(&mut self) {
        let select = !self.all_selected();
        self.selected.iter_mut().for_each(|slot| *slot = select);
    }

    pub fn all_selected(&self) -> bool {
        !self.topics.is_empty() && self.selected.iter().all(|selected| *selected)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|selected| **selected).count()
    }

    /// Titles in list order
    pub fn selected_titles(&self) -> Vec<String> {
        self.topics
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(topic, _)| topic.title.clone())
            .collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected.iter_mut().for_each(|slot| *slot = false);
    }
}
