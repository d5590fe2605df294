//! Questionnaire schema selection and the validation primitives shared by
//! both schema variants.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::VariantNames;

use crate::lifestyle::{self, LifestyleAnswers};
use crate::workplace::{self, WorkplaceAnswers};

/// Raw answers as submitted by a client, keyed by question.
pub type AnswerMap = serde_json::Map<String, Value>;

/// Message used when a failure carries no field issue.
const FALLBACK_MESSAGE: &str = "Some error occurred while validating fields";

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

/// Every issue found while validating a submission, in question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", self.message())]
pub struct ValidationErrors {
    issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    #[must_use]
    pub const fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// The message of the first issue, which is what the user gets to see.
    #[must_use]
    pub fn message(&self) -> &str {
        self.issues
            .first()
            .map_or(FALLBACK_MESSAGE, |issue| issue.message.as_str())
    }

    /// Returns true if `field` has at least one issue.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

/// Which questionnaire a deployment collects.
///
/// The two variants have disjoint question sets and are never merged.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    sqlx::Type,
    strum::Display,
    strum::EnumString,
)]
#[sqlx(type_name = "checkup_schema", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SchemaVariant {
    /// Workplace factors: age, benefits, leave, interference with work.
    #[default]
    Workplace,
    /// Lifestyle and occupation: days indoors, stress, habits, coping.
    Lifestyle,
}

impl SchemaVariant {
    /// Validates raw answers against this schema.
    ///
    /// Keys the schema does not know are ignored.
    ///
    /// # Errors
    ///
    /// Returns every missing, mistyped or out-of-range field.
    pub fn validate(self, input: &AnswerMap) -> Result<Submission, ValidationErrors> {
        match self {
            Self::Workplace => WorkplaceAnswers::validate(input).map(Submission::Workplace),
            Self::Lifestyle => LifestyleAnswers::validate(input).map(Submission::Lifestyle),
        }
    }

    /// Questions in the order the form presents them.
    #[must_use]
    pub const fn questions(self) -> &'static [Question] {
        match self {
            Self::Workplace => workplace::QUESTIONS,
            Self::Lifestyle => lifestyle::QUESTIONS,
        }
    }

    /// Answers a fresh form starts from. Empty when the schema has no defaults.
    #[must_use]
    pub fn default_answers(self) -> AnswerMap {
        match self {
            Self::Workplace => match serde_json::to_value(WorkplaceAnswers::default()) {
                Ok(Value::Object(map)) => map,
                _ => AnswerMap::new(),
            },
            Self::Lifestyle => AnswerMap::new(),
        }
    }

    /// Everything a client needs to render the check-up form.
    #[must_use]
    pub fn form(self) -> FormDescriptor {
        FormDescriptor {
            schema: self,
            questions: self.questions(),
            defaults: self.default_answers(),
        }
    }
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Submission {
    Workplace(WorkplaceAnswers),
    Lifestyle(LifestyleAnswers),
}

impl Submission {
    #[must_use]
    pub const fn schema(&self) -> SchemaVariant {
        match self {
            Self::Workplace(_) => SchemaVariant::Workplace,
            Self::Lifestyle(_) => SchemaVariant::Lifestyle,
        }
    }

    /// The normalized answers as stored alongside a check-up record.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn answers_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// A single question of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Choice { options: &'static [&'static str] },
    Integer { min: i32, max: i32 },
}

/// Form descriptor served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct FormDescriptor {
    pub schema: SchemaVariant,
    pub questions: &'static [Question],
    pub defaults: AnswerMap,
}

/// Reads a closed-set answer, recording an issue if it is missing or unknown.
pub(crate) fn choice<T>(input: &AnswerMap, key: &str, issues: &mut Vec<FieldIssue>) -> Option<T>
where
    T: FromStr + VariantNames,
{
    let Some(value) = input.get(key) else {
        issues.push(FieldIssue::new(key, format!("{key} is required")));
        return None;
    };

    let Some(raw) = value.as_str() else {
        issues.push(FieldIssue::new(
            key,
            format!("{key} must be one of: {}", expected(T::VARIANTS)),
        ));
        return None;
    };

    if let Ok(parsed) = raw.parse::<T>() {
        Some(parsed)
    } else {
        issues.push(FieldIssue::new(
            key,
            format!(
                "Invalid value '{raw}' for {key}. Expected one of: {}",
                expected(T::VARIANTS)
            ),
        ));
        None
    }
}

/// Reads a whole-number answer bounded to `min..=max`.
pub(crate) fn integer_in(
    input: &AnswerMap,
    key: &str,
    label: &str,
    (min, max): (i32, i32),
    issues: &mut Vec<FieldIssue>,
) -> Option<i32> {
    let Some(value) = input.get(key) else {
        issues.push(FieldIssue::new(key, format!("{key} is required")));
        return None;
    };

    let Some(number) = value.as_number() else {
        issues.push(FieldIssue::new(key, format!("{label} must be a number")));
        return None;
    };

    let Some(whole) = number
        .as_i64()
        .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
    else {
        issues.push(FieldIssue::new(key, format!("{label} must be a whole number")));
        return None;
    };

    if whole < i64::from(min) {
        issues.push(FieldIssue::new(key, format!("{label} must be at least {min}")));
        return None;
    }
    if whole > i64::from(max) {
        issues.push(FieldIssue::new(
            key,
            format!("{label} must be less than or equal to {max}"),
        ));
        return None;
    }

    i32::try_from(whole).ok()
}

fn expected(options: &[&str]) -> String {
    options
        .iter()
        .map(|option| format!("'{option}'"))
        .collect::<Vec<_>>()
        .join(" | ")
}
