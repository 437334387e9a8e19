//! Traversal guards: wall-clock deadline and per-path cycle detection

use crate::error::{Result, SiteWiseError};
use std::time::{Duration, Instant};

/// Wall-clock limit measured from construction
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn new(limit: Duration) -> Self {
        Self::starting_at(Instant::now(), limit)
    }

    pub fn starting_at(started: Instant, limit: Duration) -> Self {
        Self { started, limit }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Fail with [`SiteWiseError::Timeout`] once the limit is exceeded
    pub fn check(&self) -> Result<()> {
        let elapsed = self.elapsed();
        if elapsed > self.limit {
            return Err(SiteWiseError::Timeout {
                elapsed,
                limit: self.limit,
            });
        }
        Ok(())
    }
}

/// Ids on the current recursion path, root first
#[derive(Debug, Clone, Default)]
pub struct TraversalPath {
    ids: Vec<String>,
}

impl TraversalPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `id`, failing if it is already on the path
    pub fn enter(&mut self, id: &str) -> Result<()> {
        if self.contains(id) {
            let mut path = self.ids.clone();
            path.push(id.to_string());
            return Err(SiteWiseError::CycleDetected { path });
        }
        self.ids.push(id.to_string());
        Ok(())
    }

    pub fn leave(&mut self) {
        self.ids.pop();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn depth(&self) -> usize {
        self.ids.len()
    }
}
