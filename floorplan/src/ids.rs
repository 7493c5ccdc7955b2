//! Recyclable integer id pools for rooms, areas and stickers.
//!
//! Deleted ids go back into the pool and the smallest recycled id is always
//! handed out first. Rooms draw from a fixed ring of 1..=100; areas and
//! stickers take the smallest id not held by a live entity.

#[cfg(test)]
#[path = "ids_test.rs"]
mod ids_test;

use std::collections::BTreeSet;

/// Highest room id; room ids wrap back to 1 after it.
pub const MAX_ROOM_ID: u32 = 100;

/// Highest area id accepted back into the recycle set.
pub const MAX_AREA_ID: u32 = 10_000;

/// How fresh ids are chosen once the recycle set is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// Counter over `1..=max`, wrapping and skipping live ids.
    Wrapping { max: u32 },
    /// Smallest id not in use, scanning from 1. Recycling accepts ids up to
    /// `max` when set.
    SmallestUnused { max: Option<u32> },
}

impl IdPolicy {
    fn accepts(self, id: u32) -> bool {
        match self {
            Self::Wrapping { max } | Self::SmallestUnused { max: Some(max) } => (1..=max).contains(&id),
            Self::SmallestUnused { max: None } => id >= 1,
        }
    }
}

/// One id allocator with its recycle set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPool {
    policy: IdPolicy,
    next: u32,
    available: BTreeSet<u32>,
}

impl IdPool {
    #[must_use]
    pub fn new(policy: IdPolicy) -> Self {
        Self { policy, next: 1, available: BTreeSet::new() }
    }

    #[must_use]
    pub fn rooms() -> Self {
        Self::new(IdPolicy::Wrapping { max: MAX_ROOM_ID })
    }

    #[must_use]
    pub fn areas() -> Self {
        Self::new(IdPolicy::SmallestUnused { max: Some(MAX_AREA_ID) })
    }

    #[must_use]
    pub fn stickers() -> Self {
        Self::new(IdPolicy::SmallestUnused { max: None })
    }

    /// Rebuild a pool from persisted counters. Out-of-range recycled ids are
    /// dropped; a zero counter restarts at 1.
    #[must_use]
    pub fn restore(policy: IdPolicy, next: u32, available: impl IntoIterator<Item = u32>) -> Self {
        Self {
            policy,
            next: next.max(1),
            available: available.into_iter().filter(|id| policy.accepts(*id)).collect(),
        }
    }

    /// Hand out an id not contained in `live`. Returns `None` only when a
    /// wrapping pool has every id in use.
    pub fn allocate(&mut self, live: &BTreeSet<u32>) -> Option<u32> {
        while let Some(id) = self.available.pop_first() {
            if !live.contains(&id) {
                self.bump_past(id);
                return Some(id);
            }
        }

        match self.policy {
            IdPolicy::Wrapping { max } => {
                let mut candidate = self.next.clamp(1, max);
                for _ in 0..max {
                    if !live.contains(&candidate) {
                        self.next = candidate % max + 1;
                        return Some(candidate);
                    }
                    candidate = candidate % max + 1;
                }
                None
            }
            IdPolicy::SmallestUnused { .. } => {
                let id = (1..).find(|id| !live.contains(id))?;
                self.bump_past(id);
                Some(id)
            }
        }
    }

    /// Return an id to the pool. Ids outside the policy's range are ignored.
    pub fn recycle(&mut self, id: u32) {
        if self.policy.accepts(id) {
            self.available.insert(id);
        }
    }

    /// Counter persisted as `next*Id`.
    #[must_use]
    pub fn next(&self) -> u32 {
        self.next
    }

    /// Recycled ids in ascending order.
    #[must_use]
    pub fn available(&self) -> Vec<u32> {
        self.available.iter().copied().collect()
    }

    #[must_use]
    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    fn bump_past(&mut self, id: u32) {
        if let IdPolicy::SmallestUnused { .. } = self.policy {
            self.next = self.next.max(id.saturating_add(1));
        }
    }
}
