use quiz_core::time::{Elapsed, format_elapsed};

/// Running clock line under the question.
#[must_use]
pub fn time_label(elapsed: Elapsed) -> String {
    format!("Time: {}", format_elapsed(elapsed.secs()))
}

#[must_use]
pub fn time_taken_label(time_taken: Elapsed) -> String {
    format!("You took Time: {time_taken} to solve this question.")
}
