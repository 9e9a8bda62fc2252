//! Small injected key-value store for client-side state.
//!
//! Favorites and the session token are read and written through
//! [`KeyValueStore`] instead of a global, so any backend (memory, a file, a
//! browser bridge) can be plugged in and tests need nothing but
//! [`MemoryStore`].

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::types::ItemId;

const FAVORITES_KEY: &str = "favorites";
const TOKEN_KEY: &str = "token";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.values.read() {
            Ok(values) => values.get(key).cloned(),
            Err(err) => {
                log::error!("Store lock poisoned: {err}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: String) {
        match self.values.write() {
            Ok(mut values) => {
                values.insert(key.to_string(), value);
            }
            Err(err) => log::error!("Store lock poisoned: {err}"),
        }
    }

    fn remove(&self, key: &str) {
        match self.values.write() {
            Ok(mut values) => {
                values.remove(key);
            }
            Err(err) => log::error!("Store lock poisoned: {err}"),
        }
    }
}

/// Ordered, de-duplicated list of favorite item ids stored as JSON.
pub struct FavoritesStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> FavoritesStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Current favorites. A corrupt entry reads as an empty list.
    pub fn list(&self) -> Vec<ItemId> {
        let Some(raw) = self.store.get(FAVORITES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => ids
                .into_iter()
                .filter_map(|id| ItemId::new(id).ok())
                .collect(),
            Err(err) => {
                log::warn!("Ignoring unreadable favorites entry: {err}");
                Vec::new()
            }
        }
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.list().contains(id)
    }

    /// Appends `id`; returns false if it was already present.
    pub fn add(&self, id: ItemId) -> bool {
        let mut ids = self.list();
        if ids.contains(&id) {
            return false;
        }
        ids.push(id);
        self.save(&ids);
        true
    }

    /// Removes `id`; returns false if it was not present.
    pub fn remove(&self, id: &ItemId) -> bool {
        let mut ids = self.list();
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() == before {
            return false;
        }
        self.save(&ids);
        true
    }

    /// Flips membership and returns whether `id` is now a favorite.
    pub fn toggle(&self, id: ItemId) -> bool {
        if self.remove(&id) {
            false
        } else {
            self.add(id)
        }
    }

    fn save(&self, ids: &[ItemId]) {
        let raw: Vec<&str> = ids.iter().map(ItemId::as_str).collect();
        match serde_json::to_string(&raw) {
            Ok(json) => self.store.set(FAVORITES_KEY, json),
            Err(err) => log::error!("Failed to encode favorites: {err}"),
        }
    }
}

/// Auth token persisted between sessions.
pub struct SessionStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> SessionStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store
            .get(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.store.set(TOKEN_KEY, token.into());
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
    }
}
