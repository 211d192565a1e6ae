use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
};

use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::models::Movie;

const FIRST_ID: u64 = 1;

/// In-memory movie table keyed by id. `BTreeMap` keeps listings in ascending id order.
pub struct MovieStore {
    movies: RwLock<BTreeMap<u64, Movie>>,
    next_id: AtomicU64,
}

impl MovieStore {
    pub fn new() -> Self {
        Self { movies: RwLock::new(BTreeMap::new()), next_id: AtomicU64::new(FIRST_ID) }
    }

    /// Hands out each id exactly once, even across deletes.
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub async fn get(&self, id: u64) -> Option<Movie> {
        self.movies.read().await.get(&id).cloned()
    }

    pub async fn delete(&self, id: u64) -> Option<Movie> {
        self.movies.write().await.remove(&id)
    }

    pub async fn list_all(&self) -> Vec<Movie> {
        self.movies.read().await.values().cloned().collect()
    }

    /// Case-insensitive substring match on titles.
    pub async fn search(&self, query: &str) -> Vec<Movie> {
        let needle = query.to_lowercase();
        self.movies
            .read()
            .await
            .values()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn reset(&self) {
        let mut movies = self.movies.write().await;
        movies.clear();
        self.next_id.store(FIRST_ID, Ordering::Relaxed);
    }

    /// Exclusive access for a duplicate scan followed by a mutation. Holding the
    /// returned table blocks every other reader and writer.
    pub async fn write(&self) -> MovieTable<'_> {
        MovieTable { store: self, movies: self.movies.write().await }
    }
}

impl Default for MovieStore {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MovieTable<'a> {
    store: &'a MovieStore,
    movies: RwLockWriteGuard<'a, BTreeMap<u64, Movie>>,
}

impl MovieTable<'_> {
    pub fn next_id(&self) -> u64 {
        self.store.next_id()
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Movie> {
        self.movies.get_mut(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.movies.contains_key(&id)
    }

    /// True if a movie other than `except` already holds exactly this title.
    pub fn title_taken(&self, title: &str, except: Option<u64>) -> bool {
        self.movies.values().any(|m| Some(m.id) != except && m.title == title)
    }

    pub fn put(&mut self, id: u64, movie: Movie) {
        self.movies.insert(id, movie);
    }
}
