mod bank;
mod grading;
mod ids;
mod question;

pub use ids::{OptionId, QuestionId};

pub use bank::{BankError, QuestionBank};
pub use grading::{OptionMark, Response, ResponseError, Verdict, parse_numeric};
pub use question::{
    ChoiceOption, Question, QuestionDraft, QuestionError, QuestionKind, QuestionKindDraft,
};
