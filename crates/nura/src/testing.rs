//! In-memory collaborators for workflow, form and router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use chrono::{DateTime, Duration, Utc};
use checkup_structs::{
    AnswerMap, AuthSession, CheckUpHistory, CheckUpRecord, CreateCheckUp, Prediction,
    SchemaVariant, User,
};
use predictor_client::{PredictionRequest, Predictor};
use serde_json::json;
use uuid::Uuid;

use crate::cache::ViewInvalidator;
use crate::store::CheckUpStore;
use crate::workflow::CheckUpService;

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    sessions: HashMap<String, AuthSession>,
    records: Vec<CheckUpRecord>,
    read_failure: Option<String>,
    write_failure: Option<String>,
}

/// Store keeping users, sessions and check-ups in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn with_user(id: &str, email: &str, verified: bool) -> Self {
        let store = Self::default();
        store.add_user(id, email, verified);
        store
    }

    pub fn add_user(&self, id: &str, email: &str, verified: bool) {
        self.inner.lock().unwrap().users.push(user(id, email, verified));
    }

    /// Adds a session for an existing user, expiring `ttl` from now.
    pub fn add_session(&self, token: &str, user_id: &str, ttl: Duration) {
        let mut inner = self.inner.lock().unwrap();
        let user = inner
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .unwrap();
        inner.sessions.insert(
            token.to_owned(),
            AuthSession {
                user,
                expires_at: Utc::now() + ttl,
            },
        );
    }

    pub fn seed(&self, record: CheckUpRecord) {
        self.inner.lock().unwrap().records.push(record);
    }

    pub fn fail_reads(&self, err: anyhow::Error) {
        self.inner.lock().unwrap().read_failure = Some(err.to_string());
    }

    pub fn fail_writes(&self, err: anyhow::Error) {
        self.inner.lock().unwrap().write_failure = Some(err.to_string());
    }

    pub fn records(&self) -> Vec<CheckUpRecord> {
        self.inner.lock().unwrap().records.clone()
    }

    /// Number of successful check-up inserts.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read<T>(&self, f: impl FnOnce(&Inner) -> T) -> Result<T> {
        let inner = self.inner.lock().unwrap();
        match &inner.read_failure {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(f(&inner)),
        }
    }
}

impl CheckUpStore for MemoryStore {
    async fn find_user(&self, id: &str, email: Option<&str>) -> Result<Option<User>> {
        self.read(|inner| {
            inner
                .users
                .iter()
                .find(|u| u.id == id && email.is_none_or(|email| u.email == email))
                .cloned()
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.read(|inner| inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_session(&self, token: &str) -> Result<Option<AuthSession>> {
        self.read(|inner| {
            inner
                .sessions
                .get(token)
                .filter(|session| session.expires_at > Utc::now())
                .cloned()
        })
    }

    async fn create_check_up(&self, input: CreateCheckUp) -> Result<CheckUpRecord> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(message) = &inner.write_failure {
            return Err(anyhow!(message.clone()));
        }
        let record = CheckUpRecord {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            schema: input.schema,
            answers: input.answers,
            condition: input.condition,
            treatment: input.treatment,
            created_at: Utc::now(),
        };
        inner.records.push(record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(record)
    }

    async fn check_up_history(&self, user_id: &str) -> Result<CheckUpHistory> {
        self.read(|inner| {
            let mut check_ups: Vec<_> = inner
                .records
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect();
            check_ups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let count = i64::try_from(check_ups.len()).unwrap();
            CheckUpHistory { count, check_ups }
        })
    }
}

/// Predictor returning a fixed outcome and counting calls.
pub struct FakePredictor {
    pub calls: AtomicUsize,
    outcome: Result<Prediction, String>,
    last: Mutex<Option<PredictionRequest>>,
}

impl FakePredictor {
    pub fn returning(condition: &str, treatment: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome: Ok(Prediction {
                condition: condition.to_owned(),
                treatment: treatment.to_owned(),
            }),
            last: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome: Err(message.to_owned()),
            last: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<PredictionRequest> {
        self.last.lock().unwrap().clone()
    }
}

impl Predictor for FakePredictor {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request.clone());
        self.outcome.clone().map_err(|message| anyhow!(message))
    }
}

/// Invalidator remembering which users were invalidated.
#[derive(Default)]
pub struct RecordingInvalidator {
    users: Mutex<Vec<String>>,
}

impl RecordingInvalidator {
    pub fn invalidated(&self) -> Vec<String> {
        self.users.lock().unwrap().clone()
    }
}

impl ViewInvalidator for RecordingInvalidator {
    fn invalidate_dashboard(&self, user_id: &str) {
        self.users.lock().unwrap().push(user_id.to_owned());
    }
}

pub type TestService = CheckUpService<MemoryStore, FakePredictor, RecordingInvalidator>;

/// Builds a workplace service over the given fakes and hands back handles to them.
pub fn service(
    store: MemoryStore,
    predictor: FakePredictor,
) -> (
    TestService,
    Arc<MemoryStore>,
    Arc<FakePredictor>,
    Arc<RecordingInvalidator>,
) {
    let store = Arc::new(store);
    let predictor = Arc::new(predictor);
    let invalidator = Arc::new(RecordingInvalidator::default());
    let svc = CheckUpService::new(
        Arc::clone(&store),
        Arc::clone(&predictor),
        Arc::clone(&invalidator),
        SchemaVariant::Workplace,
    );
    (svc, store, predictor, invalidator)
}

pub fn user(id: &str, email: &str, verified: bool) -> User {
    User {
        id: id.to_owned(),
        name: format!("User {id}"),
        email: email.to_owned(),
        email_verified: verified,
        created_at: Utc::now(),
    }
}

pub fn record_at(user_id: &str, condition: &str, created_at: DateTime<Utc>) -> CheckUpRecord {
    CheckUpRecord {
        id: Uuid::new_v4(),
        user_id: user_id.to_owned(),
        schema: SchemaVariant::Workplace,
        answers: json!({}),
        condition: condition.to_owned(),
        treatment: "No".to_owned(),
        created_at,
    }
}

pub fn workplace_answers() -> AnswerMap {
    let value = json!({
        "age": 24,
        "gender": "Female",
        "work_interfere": "Sometimes",
        "family_history": "Yes",
        "benefits": "Don't know",
        "care_options": "Not sure",
        "leave": "Somewhat easy",
        "mental_health_consequence": "Maybe",
        "self_employed": "No",
        "mental_health_interview": "No",
        "yoga": "Yes",
    });
    value.as_object().cloned().unwrap()
}

pub fn lifestyle_answers() -> AnswerMap {
    let value = json!({
        "gender": "Male",
        "occupation": "Student",
        "self_employed": "No",
        "family_history": "No",
        "mental_health_history": "Maybe",
        "days_indoors": "1-14 days",
        "habits_change": "Yes",
        "increasing_stress": "Yes",
        "social_weakness": "No",
        "coping_struggles": "No",
        "work_interest": "Maybe",
        "mental_health_interview": "No",
        "care_options": "Yes",
    });
    value.as_object().cloned().unwrap()
}
