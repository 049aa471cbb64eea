//! Meteors and portals
//!
//! Meteors are static cells that end the game on contact. Portals come in
//! linked pairs: a head landing on one endpoint re-emerges at the other,
//! gaining one extra segment for the traversal. Each endpoint has a cooldown
//! so the snake cannot bounce straight back, and the whole pair is replaced
//! on a fixed interval.

use std::time::Duration;
use tracing::debug;

use super::state::{Position, Snake};

pub fn check_meteor_collision(meteors: &[Position], head: Position) -> bool {
    meteors.contains(&head)
}

/// Two linked, distinct cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortalPair {
    endpoints: [Position; 2],
}

impl PortalPair {
    /// Returns `None` when both endpoints are the same cell
    pub fn new(a: Position, b: Position) -> Option<Self> {
        if a == b {
            return None;
        }
        Some(Self { endpoints: [a, b] })
    }

    pub fn endpoints(&self) -> [Position; 2] {
        self.endpoints
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.endpoints.contains(&pos)
    }

    /// Index of the endpoint at `pos` and the position of its partner
    pub fn exit_for(&self, pos: Position) -> Option<(usize, Position)> {
        self.endpoints
            .iter()
            .position(|&p| p == pos)
            .map(|idx| (idx, self.endpoints[1 - idx]))
    }
}

/// A portal pair plus its timers
#[derive(Debug, Clone, PartialEq)]
pub struct PortalState {
    pair: PortalPair,
    /// Last time each endpoint was entered
    last_used: [Option<Duration>; 2],
    /// When the current pair went live; set on the first step that sees it
    placed_at: Option<Duration>,
}

impl PortalState {
    pub fn new(pair: PortalPair) -> Self {
        Self {
            pair,
            last_used: [None, None],
            placed_at: None,
        }
    }

    pub fn pair(&self) -> &PortalPair {
        &self.pair
    }

    /// Anchor the regeneration timer to the first time the world is stepped
    pub fn start_timer(&mut self, now: Duration) {
        if self.placed_at.is_none() {
            self.placed_at = Some(now);
        }
    }

    /// The exit endpoint if `head` sits on an endpoint whose cooldown has
    /// elapsed. Does not consume the cooldown; see [`mark_used`](Self::mark_used).
    pub fn ready_exit(
        &self,
        head: Position,
        now: Duration,
        cooldown: Duration,
    ) -> Option<(usize, Position)> {
        let (idx, exit) = self.pair.exit_for(head)?;
        match self.last_used[idx] {
            Some(used) if now.saturating_sub(used) < cooldown => None,
            _ => Some((idx, exit)),
        }
    }

    pub fn mark_used(&mut self, idx: usize, now: Duration) {
        self.last_used[idx] = Some(now);
    }

    /// Exit position for a head that landed on a ready endpoint, consuming
    /// that endpoint's cooldown. An exit covered by `snake` blocks the trip
    /// and leaves the cooldown untouched.
    pub fn try_teleport(
        &mut self,
        head: Position,
        now: Duration,
        cooldown: Duration,
        snake: &Snake,
    ) -> Option<Position> {
        let (idx, exit) = self.ready_exit(head, now, cooldown)?;
        if snake.contains(exit) {
            debug!(row = exit.row, col = exit.col, "portal exit blocked by body");
            return None;
        }
        self.mark_used(idx, now);
        Some(exit)
    }

    pub fn regen_due(&self, now: Duration, interval: Duration) -> bool {
        match self.placed_at {
            Some(placed) => now.saturating_sub(placed) >= interval,
            None => false,
        }
    }

    /// Swap in a whole new pair; cooldowns start over
    pub fn replace(&mut self, pair: PortalPair, now: Duration) {
        self.pair = pair;
        self.last_used = [None, None];
        self.placed_at = Some(now);
    }

    /// Keep the current pair but restart the regeneration timer
    pub fn restart_timer(&mut self, now: Duration) {
        self.placed_at = Some(now);
    }
}
