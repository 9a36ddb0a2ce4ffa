use std::collections::BTreeSet;

use quiz_core::model::{OptionId, OptionMark, Question, QuestionKind, Response, ResponseError};
use services::{QuizError, QuizSession};

use super::html_vm::sanitize_html;
use super::time_fmt::{time_label, time_taken_label};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Previous,
    Next,
    Submit,
    ToggleOption(OptionId),
    SetNumeric(String),
    RevealExplanation,
}

//
// ─── RESPONSE DRAFT ────────────────────────────────────────────────────────────
//

/// In-progress input for one question instance.
///
/// A draft only applies to the instance it was created for; rendering with a
/// draft from another instance shows empty inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseDraft {
    instance: u64,
    selected: BTreeSet<OptionId>,
    numeric: String,
}

impl ResponseDraft {
    #[must_use]
    pub fn for_instance(instance: u64) -> Self {
        Self {
            instance,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Drop the input if it belongs to an older instance.
    pub fn sync(&mut self, instance: u64) {
        if self.instance != instance {
            *self = Self::for_instance(instance);
        }
    }

    pub fn toggle(&mut self, id: OptionId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn set_numeric(&mut self, raw: impl Into<String>) {
        self.numeric = raw.into();
    }

    #[must_use]
    pub fn is_selected(&self, id: &OptionId) -> bool {
        self.selected.contains(id)
    }

    #[must_use]
    pub fn numeric(&self) -> &str {
        &self.numeric
    }

    /// The response to grade, shaped for the question's kind.
    #[must_use]
    pub fn to_response(&self, question: &Question) -> Response {
        if question.is_multi_select() {
            Response::Selected(self.selected.clone())
        } else {
            Response::numeric(self.numeric.as_str())
        }
    }
}

//
// ─── VIEW MODEL ────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Wrong,
}

impl Feedback {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Feedback::Correct => "✔ Correct",
            Feedback::Wrong => "✘ Wrong",
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Feedback::Correct => "quiz-feedback quiz-feedback--correct",
            Feedback::Wrong => "quiz-feedback quiz-feedback--wrong",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptionVm {
    pub id: OptionId,
    /// Unique DOM id tying the checkbox to its label.
    pub dom_id: String,
    pub label_html: String,
    pub checked: bool,
    pub mark: Option<OptionMark>,
}

impl OptionVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.mark {
            Some(OptionMark::Correct) => "quiz-option quiz-option--correct",
            Some(OptionMark::Wrong) => "quiz-option quiz-option--wrong",
            None => "quiz-option",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnswerInputVm {
    Options(Vec<OptionVm>),
    Numeric { value: String },
}

/// Everything the quiz view shows for the active question instance.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionViewModel {
    pub instance: u64,
    pub title: String,
    pub body_html: String,
    pub progress_label: String,
    pub input: AnswerInputVm,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub time_label: String,
    pub feedback: Option<Feedback>,
    pub time_taken_label: Option<String>,
    pub revealed_answer: Option<String>,
    pub explanation_html: Option<String>,
}

/// Describe the active question of `session` with the user's current input.
#[must_use]
pub fn render_question(session: &QuizSession, draft: &ResponseDraft) -> QuestionViewModel {
    let question = session.current_question();
    let instance = session.instance();
    let empty = ResponseDraft::for_instance(instance);
    let draft = if draft.instance() == instance {
        draft
    } else {
        &empty
    };
    let submission = session.submission();

    let input = match question.kind() {
        QuestionKind::MultiSelect { options, .. } => AnswerInputVm::Options(
            options
                .iter()
                .map(|option| OptionVm {
                    id: option.id.clone(),
                    dom_id: format!("q{}-{}", question.id(), option.id),
                    label_html: sanitize_html(&option.label),
                    checked: draft.is_selected(&option.id),
                    mark: submission.and_then(|s| s.verdict.mark_for(&option.id)),
                })
                .collect(),
        ),
        QuestionKind::Numerical { .. } => AnswerInputVm::Numeric {
            value: draft.numeric().to_string(),
        },
    };

    QuestionViewModel {
        instance,
        title: question.title().to_string(),
        body_html: sanitize_html(question.question_text()),
        progress_label: session.progress().label(),
        input,
        can_go_previous: !session.is_first(),
        can_go_next: !session.is_last(),
        time_label: time_label(session.elapsed()),
        feedback: submission.map(|s| {
            if s.is_correct() {
                Feedback::Correct
            } else {
                Feedback::Wrong
            }
        }),
        time_taken_label: submission.map(|s| time_taken_label(s.time_taken)),
        revealed_answer: submission
            .and_then(|s| s.revealed_answer())
            .map(|answer| format!("Correct answer: {answer}")),
        explanation_html: session
            .explanation_visible()
            .then(|| sanitize_html(question.explanation())),
    }
}

/// Message shown for a rejected action.
#[must_use]
pub fn notice_for(err: &QuizError) -> &'static str {
    match err {
        QuizError::AtFirstQuestion => "You're at the first question.",
        QuizError::AtLastQuestion => "You're at the last question.",
        QuizError::Response(ResponseError::NothingSelected) => {
            "Please select at least one option before submitting."
        }
        QuizError::Response(ResponseError::BlankNumeric) => {
            "Please enter your numeric answer before submitting."
        }
        QuizError::Response(ResponseError::NotANumber(_)) => "Please enter a valid number.",
        _ => "Something went wrong. Please try again.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionBank;
    use quiz_core::time::fixed_clock;
    use storage::bundled::bundled_drafts;

    fn build_session() -> QuizSession {
        let bank = QuestionBank::from_drafts(bundled_drafts()).unwrap();
        QuizSession::new(bank, fixed_clock())
    }

    fn to_msq(session: &mut QuizSession) {
        session.go_to_next().unwrap();
        session.go_to_next().unwrap();
    }

    #[test]
    fn fresh_numerical_question_has_empty_input_and_no_feedback() {
        let session = build_session();
        let vm = render_question(&session, &ResponseDraft::default());
        assert_eq!(vm.title, "Question-01: ~ GATE 2024 Set 1 [Numerical]");
        assert_eq!(vm.progress_label, "Question 1 of 5");
        assert_eq!(vm.input, AnswerInputVm::Numeric { value: String::new() });
        assert_eq!(vm.time_label, "Time: 0 sec");
        assert!(!vm.can_go_previous);
        assert!(vm.can_go_next);
        assert_eq!(vm.feedback, None);
        assert_eq!(vm.time_taken_label, None);
        assert_eq!(vm.revealed_answer, None);
        assert_eq!(vm.explanation_html, None);
    }

    #[test]
    fn body_is_sanitized_but_keeps_markup() {
        let session = build_session();
        let vm = render_question(&session, &ResponseDraft::default());
        assert!(vm.body_html.contains("<strong>Question:</strong>"));
        assert!(vm.body_html.contains("<pre>"));
    }

    #[test]
    fn wrong_numerical_answer_reveals_correct_value_once() {
        let mut session = build_session();
        session.tick(0);
        session.submit(&Response::numeric("39")).unwrap();
        session.submit(&Response::numeric("38")).unwrap();

        let vm = render_question(&session, &ResponseDraft::default());
        assert_eq!(vm.feedback, Some(Feedback::Wrong));
        assert_eq!(vm.revealed_answer.as_deref(), Some("Correct answer: 40"));
        assert_eq!(
            vm.time_taken_label.as_deref(),
            Some("You took Time: 1 sec to solve this question.")
        );
    }

    #[test]
    fn reveal_stays_after_correct_resubmit() {
        let mut session = build_session();
        session.submit(&Response::numeric("39")).unwrap();
        session.submit(&Response::numeric("40")).unwrap();

        let vm = render_question(&session, &ResponseDraft::default());
        assert_eq!(vm.feedback, Some(Feedback::Correct));
        assert_eq!(vm.revealed_answer.as_deref(), Some("Correct answer: 40"));
    }

    #[test]
    fn correct_numerical_answer_has_no_reveal() {
        let mut session = build_session();
        session.submit(&Response::numeric("40.0")).unwrap();
        let vm = render_question(&session, &ResponseDraft::default());
        assert_eq!(vm.feedback.map(Feedback::label), Some("✔ Correct"));
        assert_eq!(vm.revealed_answer, None);
    }

    #[test]
    fn multi_select_marks_follow_verdict() {
        let mut session = build_session();
        to_msq(&mut session);
        let mut draft = ResponseDraft::for_instance(session.instance());
        draft.toggle(OptionId::new("opt2"));
        draft.toggle(OptionId::new("opt3"));
        let response = draft.to_response(session.current_question());
        session.submit(&response).unwrap();

        let vm = render_question(&session, &draft);
        let AnswerInputVm::Options(options) = vm.input else {
            panic!("expected checkboxes");
        };
        let marks: Vec<_> = options.iter().map(|o| (o.checked, o.mark)).collect();
        assert_eq!(
            marks,
            [
                (false, None),
                (true, Some(OptionMark::Correct)),
                (true, Some(OptionMark::Wrong)),
                (false, None),
            ]
        );
        assert_eq!(options[2].class(), "quiz-option quiz-option--wrong");
        assert_eq!(vm.feedback, Some(Feedback::Wrong));
        assert_eq!(vm.revealed_answer, None);
    }

    #[test]
    fn draft_from_previous_instance_is_not_shown() {
        let mut session = build_session();
        to_msq(&mut session);
        let mut draft = ResponseDraft::for_instance(session.instance());
        draft.toggle(OptionId::new("opt1"));

        session.go_to_next().unwrap();
        session.go_to_previous().unwrap();

        let vm = render_question(&session, &draft);
        let AnswerInputVm::Options(options) = vm.input else {
            panic!("expected checkboxes");
        };
        assert!(options.iter().all(|o| !o.checked));
    }

    #[test]
    fn explanation_only_after_reveal() {
        let mut session = build_session();
        session.reveal_explanation();
        let vm = render_question(&session, &ResponseDraft::default());
        let explanation = vm.explanation_html.unwrap();
        assert!(explanation.contains("<strong>40 packets</strong>"));
        assert_eq!(vm.feedback, None);
    }

    #[test]
    fn draft_toggle_and_sync() {
        let mut draft = ResponseDraft::for_instance(3);
        draft.toggle(OptionId::new("a"));
        draft.toggle(OptionId::new("b"));
        draft.toggle(OptionId::new("a"));
        assert!(!draft.is_selected(&OptionId::new("a")));
        assert!(draft.is_selected(&OptionId::new("b")));

        draft.sync(3);
        assert!(draft.is_selected(&OptionId::new("b")));
        draft.sync(4);
        assert_eq!(draft, ResponseDraft::for_instance(4));
    }

    #[test]
    fn notices_name_the_problem() {
        assert_eq!(
            notice_for(&QuizError::AtFirstQuestion),
            "You're at the first question."
        );
        assert_eq!(
            notice_for(&QuizError::AtLastQuestion),
            "You're at the last question."
        );
        assert_eq!(
            notice_for(&QuizError::Response(ResponseError::NothingSelected)),
            "Please select at least one option before submitting."
        );
        assert_eq!(
            notice_for(&QuizError::Response(ResponseError::BlankNumeric)),
            "Please enter your numeric answer before submitting."
        );
    }
}
