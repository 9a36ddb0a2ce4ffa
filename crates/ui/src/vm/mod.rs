mod html_vm;
mod quiz_vm;
mod time_fmt;

pub use html_vm::sanitize_html;
pub use quiz_vm::{
    AnswerInputVm, Feedback, OptionVm, QuestionViewModel, QuizIntent, ResponseDraft, notice_for,
    render_question,
};
pub use time_fmt::{time_label, time_taken_label};
