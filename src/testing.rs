//! Deterministic doubles for the account service's collaborators: an
//! in-memory credential store, a manually advanced clock, and a mailer
//! that records instead of sending. Compiled only for tests and the
//! `test-utils` feature.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use crate::modules::accounts::model::CredentialRecord;
use crate::modules::accounts::store::CredentialStore;
use crate::utils::clock::Clock;
use crate::utils::email::RecoveryMailer;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

#[derive(Default)]
struct MemoryInner {
    records: HashMap<i64, CredentialRecord>,
    next_id: i64,
}

/// In-memory [`CredentialStore`] with the same revision-guarded save
/// semantics as the Postgres store.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account with a freshly hashed password and no session or
    /// recovery state, the shape a record has right after registration.
    pub fn seed(&self, name: &str, email: &str, password: &str) -> CredentialRecord {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;

        let record = CredentialRecord {
            id: inner.next_id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            access_token: None,
            access_token_expires_at: None,
            refresh_token: None,
            refresh_token_expires_at: None,
            recovery_code: None,
            recovery_code_expires_at: None,
            revision: 0,
        };

        inner.records.insert(record.id, record.clone());
        record
    }

    pub fn get(&self, id: i64) -> Option<CredentialRecord> {
        self.inner.lock().unwrap().records.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .records
            .values()
            .find(|record| record.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CredentialRecord>, AppError> {
        Ok(self.get(id))
    }

    async fn save(&self, record: &CredentialRecord) -> Result<CredentialRecord, AppError> {
        let mut inner = self.inner.lock().unwrap();

        let stored = inner
            .records
            .get_mut(&record.id)
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("record not found")))?;

        if stored.revision != record.revision {
            return Err(AppError::conflict(anyhow::anyhow!(
                "record was modified concurrently"
            )));
        }

        *stored = CredentialRecord {
            revision: record.revision + 1,
            ..record.clone()
        };

        Ok(stored.clone())
    }

    async fn remove(&self, record: &CredentialRecord) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();

        inner
            .records
            .remove(&record.id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("record not found")))
    }
}

/// Clock that only moves when told to.
#[derive(Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Mailer that records `(recipient, code)` pairs; can be flipped into a
/// failing mode to exercise the mail-error path.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, code)| code.clone())
    }

    pub fn fail_next_sends(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl RecoveryMailer for RecordingMailer {
    async fn send_recovery_email(&self, to_email: &str, code: &str) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::internal(anyhow::anyhow!("mail transport down")));
        }

        self.sent
            .lock()
            .unwrap()
            .push((to_email.to_string(), code.to_string()));
        Ok(())
    }
}
