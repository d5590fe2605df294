use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::SchemaVariant;

/// A completed check-up as stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CheckUpRecord {
    pub id: Uuid,
    pub user_id: String,
    pub schema: SchemaVariant,
    pub answers: serde_json::Value,
    pub condition: String,
    pub treatment: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new check-up record.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCheckUp {
    pub user_id: String,
    pub schema: SchemaVariant,
    pub answers: serde_json::Value,
    pub condition: String,
    pub treatment: String,
}

/// Outcome returned by the predictor for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub condition: String,
    pub treatment: String,
}

/// Every check-up of a user, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckUpHistory {
    pub count: i64,
    pub check_ups: Vec<CheckUpRecord>,
}
