//! Request and response bodies of the prediction service.

use checkup_structs::{
    Benefits, CareOptions, DaysIndoors, Gender, LeaveEase, LifestyleAnswers, Occupation,
    Prediction, Submission, WorkInterfere, WorkplaceAnswers, YesNo, YesNoMaybe,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PredictionRequest {
    Workplace(WorkplacePayload),
    Lifestyle(LifestylePayload),
}

impl From<&Submission> for PredictionRequest {
    fn from(submission: &Submission) -> Self {
        match submission {
            Submission::Workplace(answers) => Self::Workplace(answers.into()),
            Submission::Lifestyle(answers) => Self::Lifestyle(answers.into()),
        }
    }
}

/// Workplace-factors payload. The service expects `Age` as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkplacePayload {
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Gender")]
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

impl From<&WorkplaceAnswers> for WorkplacePayload {
    fn from(answers: &WorkplaceAnswers) -> Self {
        Self {
            age: answers.age.to_string(),
            gender: answers.gender,
            work_interfere: answers.work_interfere,
            family_history: answers.family_history,
            benefits: answers.benefits,
            care_options: answers.care_options,
            leave: answers.leave,
            mental_health_consequence: answers.mental_health_consequence,
            self_employed: answers.self_employed,
            mental_health_interview: answers.mental_health_interview,
            yoga: answers.yoga,
        }
    }
}

/// Lifestyle and occupation payload, keyed in `PascalCase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifestylePayload {
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

impl From<&LifestyleAnswers> for LifestylePayload {
    fn from(answers: &LifestyleAnswers) -> Self {
        Self {
            gender: answers.gender,
            occupation: answers.occupation,
            self_employed: answers.self_employed,
            family_history: answers.family_history,
            mental_health_history: answers.mental_health_history,
            days_indoors: answers.days_indoors,
            habits_change: answers.habits_change,
            increasing_stress: answers.increasing_stress,
            social_weakness: answers.social_weakness,
            coping_struggles: answers.coping_struggles,
            work_interest: answers.work_interest,
            mental_health_interview: answers.mental_health_interview,
            care_options: answers.care_options,
        }
    }
}

/// Response from `POST /predict`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PredictionResponse {
    /// Predicted condition label
    #[serde(alias = "predicted_mood_swings", deserialize_with = "label")]
    pub predicted_condition: String,

    /// Treatment recommendation, sent either as a label or a flag
    #[serde(deserialize_with = "label")]
    pub treatment_needed: String,
}

impl From<PredictionResponse> for Prediction {
    fn from(response: PredictionResponse) -> Self {
        Self {
            condition: response.predicted_condition,
            treatment: response.treatment_needed,
        }
    }
}

/// Accepts a string, boolean or number and keeps its textual form.
fn label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Bool(flag) => Ok(if flag { "Yes" } else { "No" }.to_owned()),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a label, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use checkup_structs::{AnswerMap, SchemaVariant};
    use serde_json::json;

    use super::*;

    fn submission(schema: SchemaVariant, value: Value) -> Submission {
        let map: AnswerMap = value.as_object().cloned().unwrap();
        schema.validate(&map).unwrap()
    }

    #[test]
    fn test_workplace_payload_renames_age_and_gender() {
        let submission = submission(
            SchemaVariant::Workplace,
            json!({
                "age": 42,
                "gender": "Male",
                "work_interfere": "Rarely",
                "family_history": "No",
                "benefits": "Yes",
                "care_options": "No",
                "leave": "Don't know",
                "mental_health_consequence": "No",
                "self_employed": "Yes",
                "mental_health_interview": "Maybe",
                "yoga": "No",
            }),
        );

        let body = serde_json::to_value(PredictionRequest::from(&submission)).unwrap();
        assert_eq!(body["Age"], json!("42"));
        assert_eq!(body["Gender"], json!("Male"));
        assert_eq!(body["leave"], json!("Don't know"));
        assert!(body.get("age").is_none());
        assert!(body.get("gender").is_none());
    }

    #[test]
    fn test_lifestyle_payload_is_pascal_case() {
        let submission = submission(
            SchemaVariant::Lifestyle,
            json!({
                "gender": "Female",
                "occupation": "Housewife",
                "self_employed": "No",
                "family_history": "No",
                "mental_health_history": "No",
                "days_indoors": "Go out Every day",
                "habits_change": "No",
                "increasing_stress": "Maybe",
                "social_weakness": "No",
                "coping_struggles": "No",
                "work_interest": "Yes",
                "mental_health_interview": "No",
                "care_options": "Yes",
            }),
        );

        let body = serde_json::to_value(PredictionRequest::from(&submission)).unwrap();
        assert_eq!(body["Occupation"], json!("Housewife"));
        assert_eq!(body["DaysIndoors"], json!("Go out Every day"));
        assert_eq!(body["MentalHealthInterview"], json!("No"));
        assert_eq!(body.as_object().unwrap().len(), 13);
    }

    #[test]
    fn test_response_field_names() {
        let response: PredictionResponse = serde_json::from_value(json!({
            "predicted_condition": "Depression",
            "treatment_needed": "Yes",
        }))
        .unwrap();
        assert_eq!(
            Prediction::from(response),
            Prediction {
                condition: "Depression".into(),
                treatment: "Yes".into(),
            }
        );
    }

    #[test]
    fn test_response_accepts_mood_swings_and_flag() {
        let response: PredictionResponse = serde_json::from_value(json!({
            "success": true,
            "predicted_mood_swings": "High",
            "treatment_needed": true,
        }))
        .unwrap();
        assert_eq!(response.predicted_condition, "High");
        assert_eq!(response.treatment_needed, "Yes");
    }

    #[test]
    fn test_response_without_condition_is_rejected() {
        let result: Result<PredictionResponse, _> =
            serde_json::from_value(json!({ "treatment_needed": "No" }));
        assert!(result.is_err());
    }
}
