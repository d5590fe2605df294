//! The lifestyle and occupation questionnaire.

use serde::Serialize;
use strum::VariantNames;

use crate::answer::{CareOptions, DaysIndoors, Gender, Occupation, YesNo, YesNoMaybe};
use crate::schema::{AnswerMap, Question, QuestionKind, ValidationErrors, choice};

pub(crate) const QUESTIONS: &[Question] = &[
    Question {
        key: "gender",
        prompt: "What is your gender?",
        kind: QuestionKind::Choice {
            options: Gender::VARIANTS,
        },
    },
    Question {
        key: "occupation",
        prompt: "What is your occupation?",
        kind: QuestionKind::Choice {
            options: Occupation::VARIANTS,
        },
    },
    Question {
        key: "self_employed",
        prompt: "Are you self-employed?",
        kind: QuestionKind::Choice {
            options: YesNo::VARIANTS,
        },
    },
    Question {
        key: "family_history",
        prompt: "Do you have a family history of mental illness?",
        kind: QuestionKind::Choice {
            options: YesNo::VARIANTS,
        },
    },
    Question {
        key: "mental_health_history",
        prompt: "Do you have a past history of mental health issues?",
        kind: QuestionKind::Choice {
            options: YesNoMaybe::VARIANTS,
        },
    },
    Question {
        key: "days_indoors",
        prompt: "How many days do you typically spend indoors?",
        kind: QuestionKind::Choice {
            options: DaysIndoors::VARIANTS,
        },
    },
    Question {
        key: "habits_change",
        prompt: "Have you noticed any significant changes in your habits?",
        kind: QuestionKind::Choice {
            options: YesNoMaybe::VARIANTS,
        },
    },
    Question {
        key: "increasing_stress",
        prompt: "Do you feel your stress levels are increasing?",
        kind: QuestionKind::Choice {
            options: YesNoMaybe::VARIANTS,
        },
    },
    Question {
        key: "social_weakness",
        prompt: "Do you feel socially weak or isolated?",
        kind: QuestionKind::Choice {
            options: YesNoMaybe::VARIANTS,
        },
    },
    Question {
        key: "coping_struggles",
        prompt: "Do you struggle with coping with daily problems?",
        kind: QuestionKind::Choice {
            options: YesNo::VARIANTS,
        },
    },
    Question {
        key: "work_interest",
        prompt: "Do you still find interest in your work?",
        kind: QuestionKind::Choice {
            options: YesNoMaybe::VARIANTS,
        },
    },
    Question {
        key: "mental_health_interview",
        prompt: "Would you bring up a mental health issue in an interview?",
        kind: QuestionKind::Choice {
            options: YesNoMaybe::VARIANTS,
        },
    },
    Question {
        key: "care_options",
        prompt: "Are you aware of mental health care options?",
        kind: QuestionKind::Choice {
            options: CareOptions::VARIANTS,
        },
    },
];

/// Validated answers to the lifestyle and occupation questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifestyleAnswers {
    pub gender: Gender,
    pub occupation: Occupation,
    pub self_employed: YesNo,
    pub family_history: YesNo,
    pub mental_health_history: YesNoMaybe,
    pub days_indoors: DaysIndoors,
    pub habits_change: YesNoMaybe,
    pub increasing_stress: YesNoMaybe,
    pub social_weakness: YesNoMaybe,
    pub coping_struggles: YesNo,
    pub work_interest: YesNoMaybe,
    pub mental_health_interview: YesNoMaybe,
    pub care_options: CareOptions,
}

impl LifestyleAnswers {
    /// Validates raw answers.
    ///
    /// # Errors
    ///
    /// Returns every field that is missing or outside its allowed values.
    pub fn validate(input: &AnswerMap) -> Result<Self, ValidationErrors> {
        let mut issues = Vec::new();

        let gender = choice(input, "gender", &mut issues);
        let occupation = choice(input, "occupation", &mut issues);
        let self_employed = choice(input, "self_employed", &mut issues);
        let family_history = choice(input, "family_history", &mut issues);
        let mental_health_history = choice(input, "mental_health_history", &mut issues);
        let days_indoors = choice(input, "days_indoors", &mut issues);
        let habits_change = choice(input, "habits_change", &mut issues);
        let increasing_stress = choice(input, "increasing_stress", &mut issues);
        let social_weakness = choice(input, "social_weakness", &mut issues);
        let coping_struggles = choice(input, "coping_struggles", &mut issues);
        let work_interest = choice(input, "work_interest", &mut issues);
        let mental_health_interview = choice(input, "mental_health_interview", &mut issues);
        let care_options = choice(input, "care_options", &mut issues);

        let (
            Some(gender),
            Some(occupation),
            Some(self_employed),
            Some(family_history),
            Some(mental_health_history),
            Some(days_indoors),
            Some(habits_change),
            Some(increasing_stress),
            Some(social_weakness),
            Some(coping_struggles),
            Some(work_interest),
            Some(mental_health_interview),
            Some(care_options),
        ) = (
            gender,
            occupation,
            self_employed,
            family_history,
            mental_health_history,
            days_indoors,
            habits_change,
            increasing_stress,
            social_weakness,
            coping_struggles,
            work_interest,
            mental_health_interview,
            care_options,
        )
        else {
            return Err(ValidationErrors::new(issues));
        };

        Ok(Self {
            gender,
            occupation,
            self_employed,
            family_history,
            mental_health_history,
            days_indoors,
            habits_change,
            increasing_stress,
            social_weakness,
            coping_struggles,
            work_interest,
            mental_health_interview,
            care_options,
        })
    }
}
