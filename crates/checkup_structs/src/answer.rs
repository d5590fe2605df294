//! Closed answer sets offered by the questionnaire.
//!
//! Every enum parses from, and displays as, the exact label shown to the
//! user and sent to the predictor.

use serde::{Deserialize, Serialize};

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
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

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
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

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
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum YesNoMaybe {
    Yes,
    #[default]
    No,
    Maybe,
}

/// How often mental health gets in the way of work.
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
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum WorkInterfere {
    Often,
    Rarely,
    #[default]
    Never,
    Sometimes,
}

/// Whether the employer provides mental health benefits.
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
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum Benefits {
    Yes,
    No,
    #[default]
    #[strum(serialize = "Don't know")]
    #[serde(rename = "Don't know")]
    DontKnow,
}

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
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum CareOptions {
    Yes,
    No,
    #[default]
    #[strum(serialize = "Not sure")]
    #[serde(rename = "Not sure")]
    NotSure,
}

/// How easy it is to take medical leave.
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
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum LeaveEase {
    #[strum(serialize = "Very easy")]
    #[serde(rename = "Very easy")]
    VeryEasy,
    #[default]
    #[strum(serialize = "Somewhat easy")]
    #[serde(rename = "Somewhat easy")]
    SomewhatEasy,
    #[strum(serialize = "Somewhat difficult")]
    #[serde(rename = "Somewhat difficult")]
    SomewhatDifficult,
    #[strum(serialize = "Very difficult")]
    #[serde(rename = "Very difficult")]
    VeryDifficult,
    #[strum(serialize = "Don't know")]
    #[serde(rename = "Don't know")]
    DontKnow,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum Occupation {
    Corporate,
    Student,
    Business,
    Housewife,
    Others,
}

/// Typical time spent indoors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum DaysIndoors {
    #[strum(serialize = "1-14 days")]
    #[serde(rename = "1-14 days")]
    UpToTwoWeeks,
    #[strum(serialize = "15-30 days")]
    #[serde(rename = "15-30 days")]
    UpToAMonth,
    #[strum(serialize = "31-60 days")]
    #[serde(rename = "31-60 days")]
    UpToTwoMonths,
    #[strum(serialize = "More than 2 months")]
    #[serde(rename = "More than 2 months")]
    MoreThanTwoMonths,
    #[strum(serialize = "Go out Every day")]
    #[serde(rename = "Go out Every day")]
    GoOutEveryDay,
}
