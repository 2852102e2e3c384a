//! In-process record store.
//!
//! Behaves like the remote resource (server-assigned ids, whole-entity
//! replace on update, 404 for unknown ids) without any network. Counts
//! every request so callers can assert that an operation stayed local.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dinodex_core::error::RequestError;
use dinodex_core::model::{Dinosaur, NewDinosaur};
use dinodex_core::store::RecordStore;

#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<Dinosaur>>,
    requests: AtomicUsize,
    failure: Mutex<Option<RequestError>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests served so far, including failed ones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Make every following request fail with `error` (or succeed again
    /// with `None`).
    pub fn set_failure(&self, error: Option<RequestError>) {
        *lock(&self.failure) = error;
    }

    /// Copy of the stored records, bypassing the request counter.
    pub fn snapshot(&self) -> Vec<Dinosaur> {
        lock(&self.records).clone()
    }

    fn begin_request(&self) -> Result<(), RequestError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match lock(&self.failure).as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn create(&self, input: &NewDinosaur) -> Result<Dinosaur, RequestError> {
        self.begin_request()?;
        let dinosaur = Dinosaur {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name.clone(),
            size: input.size.clone(),
            diet: input.diet.clone(),
            environment: input.environment.clone(),
            features: Vec::new(),
        };
        lock(&self.records).push(dinosaur.clone());
        Ok(dinosaur)
    }

    async fn list(&self) -> Result<Vec<Dinosaur>, RequestError> {
        self.begin_request()?;
        Ok(lock(&self.records).clone())
    }

    async fn get(&self, id: &str) -> Result<Dinosaur, RequestError> {
        self.begin_request()?;
        lock(&self.records)
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| RequestError::NotFound { id: id.to_string() })
    }

    async fn update(&self, dinosaur: &Dinosaur) -> Result<Dinosaur, RequestError> {
        self.begin_request()?;
        let mut records = lock(&self.records);
        let slot = records
            .iter_mut()
            .find(|d| d.id == dinosaur.id)
            .ok_or_else(|| RequestError::NotFound {
                id: dinosaur.id.clone(),
            })?;
        *slot = dinosaur.clone();
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), RequestError> {
        self.begin_request()?;
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|d| d.id != id);
        if records.len() == before {
            return Err(RequestError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}
