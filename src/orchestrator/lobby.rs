//! Independent matches addressed by room id.
//!
//! Each room owns its own [`Match`] behind its own lock, so actions in one
//! room never wait on another. The score table is loaded once and shared.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

use crate::core::{LobbyError, MatchConfig};
use crate::scoring::ScoreTable;

use super::game_match::Match;

pub type SharedMatch = Arc<Mutex<Match>>;

pub struct Lobby {
    table: Arc<ScoreTable>,
    rooms: DashMap<String, SharedMatch>,
}

impl Lobby {
    pub fn new(table: ScoreTable) -> Self {
        Self {
            table: Arc::new(table),
            rooms: DashMap::new(),
        }
    }

    #[must_use]
    pub fn score_table(&self) -> &ScoreTable {
        &self.table
    }

    /// Open a room for `config.room_id`.
    pub fn open(&self, config: MatchConfig) -> Result<SharedMatch, LobbyError> {
        match self.rooms.entry(config.room_id.clone()) {
            Entry::Occupied(entry) => Err(LobbyError::RoomExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                let room_id = config.room_id.clone();
                let players = config.players;
                let game = Arc::new(Mutex::new(Match::new(config, Arc::clone(&self.table))?));
                entry.insert(Arc::clone(&game));
                info!(room = %room_id, players, "room opened");
                Ok(game)
            }
        }
    }

    /// Existing room, or a freshly opened one.
    pub fn open_or_get(&self, config: MatchConfig) -> Result<SharedMatch, LobbyError> {
        if let Some(game) = self.get(&config.room_id) {
            return Ok(game);
        }
        match self.open(config.clone()) {
            Err(LobbyError::RoomExists(_)) => self
                .get(&config.room_id)
                .ok_or(LobbyError::NoSuchRoom(config.room_id)),
            other => other,
        }
    }

    #[must_use]
    pub fn get(&self, room_id: &str) -> Option<SharedMatch> {
        self.rooms.get(room_id).map(|entry| Arc::clone(entry.value()))
    }

    /// Run `f` with exclusive access to one room.
    pub fn with_room<R>(&self, room_id: &str, f: impl FnOnce(&mut Match) -> R) -> Result<R, LobbyError> {
        let game = self
            .get(room_id)
            .ok_or_else(|| LobbyError::NoSuchRoom(room_id.to_string()))?;
        let mut guard = game.lock();
        Ok(f(&mut guard))
    }

    pub fn close(&self, room_id: &str) -> Result<(), LobbyError> {
        if self.rooms.remove(room_id).is_none() {
            return Err(LobbyError::NoSuchRoom(room_id.to_string()));
        }
        info!(room = room_id, "room closed");
        Ok(())
    }

    /// Room ids, sorted.
    #[must_use]
    pub fn room_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.rooms.iter().map(|entry| entry.key().clone()).collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
