use crate::analysis::{AnalysisResult, ListKind};
use crate::ranking::{rank, SortDirection, SortToggle};
use crate::user::User;

/// Holds the analysis currently being viewed and its sort state.
///
/// Owned by whatever front end is showing results; the core never keeps one.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    analysis: Option<AnalysisResult>,
    sort: SortToggle,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current analysis. Sorting starts over from source order.
    pub fn set_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
        self.sort.reset();
    }

    pub fn clear_analysis(&mut self) {
        self.analysis = None;
        self.sort.reset();
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn sort_direction(&self) -> Option<SortDirection> {
        self.sort.direction()
    }

    pub fn toggle_sort(&mut self) -> SortDirection {
        self.sort.activate()
    }

    /// Rows of `list` in the current sort order. Empty without an analysis.
    pub fn view(&self, list: ListKind) -> Vec<User> {
        match &self.analysis {
            Some(analysis) => rank(analysis.list(list), self.sort.direction()),
            None => Vec::new(),
        }
    }
}
