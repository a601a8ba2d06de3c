//! Seed-or-load and save helpers for collections stored under a single key.

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::infrastructure::ports::{KeyValueStore, RandomPort, RepoError};

/// Fresh-id attempts before falling back to a UUID.
const MAX_ID_ATTEMPTS: usize = 8;

/// Load the collection under `key`, or `None` when the key is absent.
pub(crate) async fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &'static str,
) -> Result<Option<Vec<T>>, RepoError> {
    match store.read(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(RepoError::serialization),
        None => Ok(None),
    }
}

/// Load the collection under `key`, writing `seed()` first if the key is absent.
///
/// Not atomic: callers serialize this with their other writes to the same key.
pub(crate) async fn load_or_seed<T, F>(
    store: &dyn KeyValueStore,
    key: &'static str,
    seed: F,
) -> Result<Vec<T>, RepoError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    if let Some(items) = load(store, key).await? {
        return Ok(items);
    }

    let seeded = seed();
    tracing::info!(key, count = seeded.len(), "Seeding empty collection");
    save(store, key, &seeded).await?;
    Ok(seeded)
}

pub(crate) async fn save<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &'static str,
    items: &[T],
) -> Result<(), RepoError> {
    let json = serde_json::to_string(items).map_err(RepoError::serialization)?;
    store.write(key, &json).await
}

/// Generate an id not already `taken`.
pub(crate) fn unique_id(random: &dyn RandomPort, taken: impl Fn(&str) -> bool) -> String {
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = random.gen_id();
        if !candidate.is_empty() && !taken(&candidate) {
            return candidate;
        }
    }
    Uuid::new_v4().simple().to_string()
}
