//! The workplace-factors questionnaire.

use serde::Serialize;
use strum::VariantNames;

use crate::answer::{Benefits, CareOptions, Gender, LeaveEase, WorkInterfere, YesNo, YesNoMaybe};
use crate::schema::{AnswerMap, Question, QuestionKind, ValidationErrors, choice, integer_in};

/// Accepted age range, inclusive.
pub const AGE_RANGE: (i32, i32) = (10, 100);

/// Age a fresh form starts from.
const DEFAULT_AGE: i32 = 24;

pub(crate) const QUESTIONS: &[Question] = &[
    Question {
        key: "age",
        prompt: "What's Your Age?",
        kind: QuestionKind::Integer {
            min: AGE_RANGE.0,
            max: AGE_RANGE.1,
        },
    },
    Question {
        key: "gender",
        prompt: "Specify Your Gender",
        kind: QuestionKind::Choice {
            options: Gender::VARIANTS,
        },
    },
    Question {
        key: "family_history",
        prompt: "Is there any family history related to mental health?",
        kind: QuestionKind::Choice {
            options: YesNo::VARIANTS,
        },
    },
    Question {
        key: "yoga",
        prompt: "Do you practice Yoga for better mental health?",
        kind: QuestionKind::Choice {
            options: YesNo::VARIANTS,
        },
    },
    Question {
        key: "self_employed",
        prompt: "Are you Self Employed (work from office/home)?",
        kind: QuestionKind::Choice {
            options: YesNo::VARIANTS,
        },
    },
    Question {
        key: "work_interfere",
        prompt: "How often you feel mental health issue while working?",
        kind: QuestionKind::Choice {
            options: WorkInterfere::VARIANTS,
        },
    },
    Question {
        key: "care_options",
        prompt: "Availing any mental health care from your work station?",
        kind: QuestionKind::Choice {
            options: CareOptions::VARIANTS,
        },
    },
    Question {
        key: "mental_health_interview",
        prompt: "Any Negative Feedback from recent mental health checkup?",
        kind: QuestionKind::Choice {
            options: YesNoMaybe::VARIANTS,
        },
    },
    Question {
        key: "mental_health_consequence",
        prompt: "Feel any problem while sharing consequences?",
        kind: QuestionKind::Choice {
            options: YesNoMaybe::VARIANTS,
        },
    },
    Question {
        key: "leave",
        prompt: "How easy it is to take a medical leave?",
        kind: QuestionKind::Choice {
            options: LeaveEase::VARIANTS,
        },
    },
    Question {
        key: "benefits",
        prompt: "Does your employer provide mental health benefits?",
        kind: QuestionKind::Choice {
            options: Benefits::VARIANTS,
        },
    },
];

/// Validated answers to the workplace-factors questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkplaceAnswers {
    pub age: i32,
    pub gender: Gender,
    pub work_interfere: WorkInterfere,
    pub family_history: YesNo,
    pub benefits: Benefits,
    pub care_options: CareOptions,
    pub leave: LeaveEase,
    pub mental_health_consequence: YesNoMaybe,
    pub self_employed: YesNo,
    pub mental_health_interview: YesNoMaybe,
    pub yoga: YesNo,
}

impl Default for WorkplaceAnswers {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            gender: Gender::default(),
            work_interfere: WorkInterfere::default(),
            family_history: YesNo::default(),
            benefits: Benefits::default(),
            care_options: CareOptions::default(),
            leave: LeaveEase::default(),
            mental_health_consequence: YesNoMaybe::default(),
            self_employed: YesNo::default(),
            mental_health_interview: YesNoMaybe::default(),
            yoga: YesNo::default(),
        }
    }
}

impl WorkplaceAnswers {
    /// Validates raw answers.
    ///
    /// # Errors
    ///
    /// Returns every field that is missing or outside its allowed values.
    pub fn validate(input: &AnswerMap) -> Result<Self, ValidationErrors> {
        let mut issues = Vec::new();

        let age = integer_in(input, "age", "Age", AGE_RANGE, &mut issues);
        let gender = choice(input, "gender", &mut issues);
        let work_interfere = choice(input, "work_interfere", &mut issues);
        let family_history = choice(input, "family_history", &mut issues);
        let benefits = choice(input, "benefits", &mut issues);
        let care_options = choice(input, "care_options", &mut issues);
        let leave = choice(input, "leave", &mut issues);
        let mental_health_consequence = choice(input, "mental_health_consequence", &mut issues);
        let self_employed = choice(input, "self_employed", &mut issues);
        let mental_health_interview = choice(input, "mental_health_interview", &mut issues);
        let yoga = choice(input, "yoga", &mut issues);

        let (
            Some(age),
            Some(gender),
            Some(work_interfere),
            Some(family_history),
            Some(benefits),
            Some(care_options),
            Some(leave),
            Some(mental_health_consequence),
            Some(self_employed),
            Some(mental_health_interview),
            Some(yoga),
        ) = (
            age,
            gender,
            work_interfere,
            family_history,
            benefits,
            care_options,
            leave,
            mental_health_consequence,
            self_employed,
            mental_health_interview,
            yoga,
        )
        else {
            return Err(ValidationErrors::new(issues));
        };

        Ok(Self {
            age,
            gender,
            work_interfere,
            family_history,
            benefits,
            care_options,
            leave,
            mental_health_consequence,
            self_employed,
            mental_health_interview,
            yoga,
        })
    }
}
