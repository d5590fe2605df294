//! Common structs for questionnaires and check-up records shared across crates.

mod answer;
mod check_up;
mod lifestyle;
mod schema;
mod user;
mod workplace;

pub use answer::*;
pub use check_up::*;
pub use lifestyle::LifestyleAnswers;
pub use schema::{
    AnswerMap, FieldIssue, FormDescriptor, Question, QuestionKind, SchemaVariant, Submission,
    ValidationErrors,
};
pub use user::*;
pub use workplace::{AGE_RANGE, WorkplaceAnswers};
