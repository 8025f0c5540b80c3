use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashSet;

use crate::protocol::ConnectionId;

/// Authoritative room membership index: room name -> member ids.
///
/// Maintained incrementally on join/leave so membership queries never scan
/// the full connection table. A room with zero members has no entry at all;
/// it exists exactly as long as someone is in it. Checks are read-committed
/// at call time; there is no reservation between a capacity check and the
/// insert that follows it.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, HashSet<ConnectionId>>,
}

impl RoomRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of every current member, in no particular order.
    #[must_use]
    pub fn members(&self, name: &str) -> Vec<ConnectionId> {
        self.rooms
            .get(name)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Current member count; zero for a nonexistent room.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.rooms.get(name).map_or(0, |set| set.len())
    }

    /// Whether the room has at least one member.
    #[must_use]
    pub fn is_occupied(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// Capacity gate for joins. A limit of zero means unlimited.
    #[must_use]
    pub fn has_capacity(&self, name: &str, limit: usize) -> bool {
        limit == 0 || self.count(name) < limit
    }

    /// Add a member, creating the room if this is its first.
    pub fn insert(&self, name: &str, id: ConnectionId) {
        self.rooms.entry(name.to_string()).or_default().insert(id);
    }

    /// Drop a member; the room entry disappears with its last member.
    pub fn remove(&self, name: &str, id: &ConnectionId) {
        if let Entry::Occupied(mut entry) = self.rooms.entry(name.to_string()) {
            entry.get_mut().remove(id);
            if entry.get().is_empty() {
                entry.remove();
            }
        }
    }
}
