/// Aggregated view of quiz position, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the active question.
    pub position: usize,
    pub total: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub submitted: bool,
}

impl QuizProgress {
    #[must_use]
    pub fn label(&self) -> String {
        format!("Question {} of {}", self.position, self.total)
    }
}
