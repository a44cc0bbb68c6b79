//! Seat assignment for connected clients.
//!
//! Players take seats 0, 1, 2... in join order until the table is full.
//! Spectators are registered but never seated.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{MatchError, PlayerId};

/// Opaque identifier the transport assigns to a connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Player,
    Spectator,
}

/// Who a snapshot is rendered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Viewer {
    Seat(PlayerId),
    Spectator,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientInfo {
    pub player_id: String,
    pub role: Role,
    pub seat: Option<PlayerId>,
}

impl ClientInfo {
    #[must_use]
    pub fn viewer(&self) -> Viewer {
        match self.seat {
            Some(seat) if self.role == Role::Player => Viewer::Seat(seat),
            _ => Viewer::Spectator,
        }
    }
}

/// Client registry for one match.
#[derive(Clone, Debug)]
pub struct SeatRegistry {
    capacity: usize,
    clients: FxHashMap<ClientId, ClientInfo>,
    seats_taken: usize,
}

impl SeatRegistry {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            clients: FxHashMap::default(),
            seats_taken: 0,
        }
    }

    /// Register a client and seat it if it joins as a player.
    ///
    /// A client that already holds a seat keeps it. Seats are never handed
    /// out twice, even after their holder leaves.
    pub fn join(
        &mut self,
        client: ClientId,
        player_id: impl Into<String>,
        role: Role,
    ) -> Result<Option<PlayerId>, MatchError> {
        let player_id = player_id.into();

        if let Some(existing) = self.clients.get_mut(&client) {
            if let Some(seat) = existing.seat {
                existing.player_id = player_id;
                return Ok(Some(seat));
            }
        }

        let seat = match role {
            Role::Spectator => None,
            Role::Player => {
                if self.is_full() {
                    return Err(MatchError::RoomFull);
                }
                let seat = PlayerId::new(self.seats_taken as u8);
                self.seats_taken += 1;
                Some(seat)
            }
        };

        self.clients.insert(client, ClientInfo { player_id, role, seat });
        Ok(seat)
    }

    pub fn leave(&mut self, client: ClientId) -> Option<ClientInfo> {
        self.clients.remove(&client)
    }

    #[must_use]
    pub fn get(&self, client: ClientId) -> Option<&ClientInfo> {
        self.clients.get(&client)
    }

    /// Seat of an acting client.
    pub fn seat_of(&self, client: ClientId) -> Result<PlayerId, MatchError> {
        let info = self.clients.get(&client).ok_or(MatchError::UnknownClient)?;
        match (info.role, info.seat) {
            (Role::Player, Some(seat)) => Ok(seat),
            _ => Err(MatchError::Spectator),
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.seats_taken >= self.capacity
    }

    #[must_use]
    pub fn seats_taken(&self) -> usize {
        self.seats_taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_players_seated_in_join_order() {
        let mut seats = SeatRegistry::new(2);

        assert_eq!(seats.join(ClientId(10), "a", Role::Player), Ok(Some(PlayerId::new(0))));
        assert_eq!(seats.join(ClientId(11), "watcher", Role::Spectator), Ok(None));
        assert_eq!(seats.join(ClientId(12), "b", Role::Player), Ok(Some(PlayerId::new(1))));
        assert!(seats.is_full());

        assert_eq!(seats.join(ClientId(13), "c", Role::Player), Err(MatchError::RoomFull));
        assert_eq!(seats.join(ClientId(14), "late watcher", Role::Spectator), Ok(None));
    }

    #[test]
    fn test_rejoin_keeps_seat() {
        let mut seats = SeatRegistry::new(3);
        seats.join(ClientId(1), "a", Role::Player).unwrap();
        seats.join(ClientId(2), "b", Role::Player).unwrap();

        assert_eq!(seats.join(ClientId(2), "b2", Role::Player), Ok(Some(PlayerId::new(1))));
        assert_eq!(seats.seats_taken(), 2);
        assert_eq!(seats.get(ClientId(2)).map(|c| c.player_id.as_str()), Some("b2"));
    }

    #[test]
    fn test_seat_of() {
        let mut seats = SeatRegistry::new(2);
        seats.join(ClientId(1), "a", Role::Player).unwrap();
        seats.join(ClientId(2), "s", Role::Spectator).unwrap();

        assert_eq!(seats.seat_of(ClientId(1)), Ok(PlayerId::new(0)));
        assert_eq!(seats.seat_of(ClientId(2)), Err(MatchError::Spectator));
        assert_eq!(seats.seat_of(ClientId(3)), Err(MatchError::UnknownClient));

        seats.leave(ClientId(1));
        assert_eq!(seats.seat_of(ClientId(1)), Err(MatchError::UnknownClient));
    }

    #[test]
    fn test_viewer() {
        let mut seats = SeatRegistry::new(2);
        seats.join(ClientId(1), "a", Role::Player).unwrap();
        seats.join(ClientId(2), "s", Role::Spectator).unwrap();

        assert_eq!(seats.get(ClientId(1)).unwrap().viewer(), Viewer::Seat(PlayerId::new(0)));
        assert_eq!(seats.get(ClientId(2)).unwrap().viewer(), Viewer::Spectator);
    }
}
