//! User-facing progress log
//!
//! A run writes human-readable milestones to a [`ProgressSink`]. Each
//! request gets its own [`RunLog`]; the process-wide [`ProgressLog`] backs
//! the polling endpoint, which drains whatever the latest run produced.

use std::sync::{Arc, Mutex, MutexGuard};

pub trait ProgressSink: Send + Sync {
    fn append(&self, line: String);

    /// Return every line and empty the log
    fn drain_and_clear(&self) -> Vec<String>;

    fn clear(&self);
}

fn lock(lines: &Mutex<Vec<String>>) -> MutexGuard<'_, Vec<String>> {
    lines.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Progress log lock poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Process-wide log read by the polling endpoint
#[derive(Debug, Clone, Default)]
pub struct ProgressLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.lines).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProgressSink for ProgressLog {
    fn append(&self, line: String) {
        lock(&self.lines).push(line);
    }

    fn drain_and_clear(&self) -> Vec<String> {
        std::mem::take(&mut *lock(&self.lines))
    }

    fn clear(&self) {
        lock(&self.lines).clear();
    }
}

/// Log scoped to a single recommendation run, optionally mirrored into
/// the process-wide log
#[derive(Debug, Default)]
pub struct RunLog {
    lines: Mutex<Vec<String>>,
    mirror: Option<ProgressLog>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mirrored(global: ProgressLog) -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            mirror: Some(global),
        }
    }

    /// Snapshot of this run's lines
    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }
}

impl ProgressSink for RunLog {
    fn append(&self, line: String) {
        if let Some(mirror) = &self.mirror {
            mirror.append(line.clone());
        }
        lock(&self.lines).push(line);
    }

    fn drain_and_clear(&self) -> Vec<String> {
        if let Some(mirror) = &self.mirror {
            mirror.clear();
        }
        std::mem::take(&mut *lock(&self.lines))
    }

    fn clear(&self) {
        if let Some(mirror) = &self.mirror {
            mirror.clear();
        }
        lock(&self.lines).clear();
    }
}
