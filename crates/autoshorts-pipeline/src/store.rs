// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process registry of run records.
//!
//! The store exclusively owns every [`Run`]; callers only ever receive
//! clones. All mutation funnels through [`RunStore::update`], which holds the
//! per-id shard lock of the underlying `DashMap` for the whole
//! read-modify-write. Writes to the same id therefore serialize, while
//! writes to different ids proceed independently. No lock is held across an
//! `.await`.

use std::sync::atomic::{AtomicU64, Ordering};

use autoshorts_core::types::{LogEntry, LogLevel, Run, RunId, RunPatch};
use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, warn};

/// Message of the log entry every run starts with.
pub const PIPELINE_STARTED: &str = "Daily upload pipeline started.";

/// A registered run plus its creation sequence (tie-breaker for listing).
#[derive(Debug)]
struct Slot {
    seq: u64,
    run: Run,
}

/// Authoritative holder of all run records for the lifetime of the process.
///
/// Retention is unbounded; records are dropped only with the store.
#[derive(Debug, Default)]
pub struct RunStore {
    runs: DashMap<RunId, Slot>,
    next_seq: AtomicU64,
}

impl RunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates and registers a new run seeded with the pipeline-start entry.
    pub fn create(&self) -> Run {
        let started_at = Utc::now();
        let mut run = Run::new(RunId::generate(), started_at);
        run.logs.push(LogEntry {
            timestamp: started_at,
            level: LogLevel::Info,
            message: PIPELINE_STARTED.to_string(),
            details: None,
        });

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.runs.insert(
            run.id.clone(),
            Slot {
                seq,
                run: run.clone(),
            },
        );
        debug!(run_id = %run.id, "run registered");
        run
    }

    /// Returns a copy of the run, or `None` for an unknown id.
    pub fn get(&self, id: &RunId) -> Option<Run> {
        self.runs.get(id).map(|slot| slot.run.clone())
    }

    /// Applies `transform` to the stored run and returns the updated copy.
    ///
    /// This is the only mutation primitive. `transform` runs under the per-id
    /// lock and must not call back into the store. A run's `id` and
    /// `started_at` survive any transform unchanged. A completed run is
    /// frozen: the transform is skipped and the current record returned.
    pub fn update<F>(&self, id: &RunId, transform: F) -> Option<Run>
    where
        F: FnOnce(&mut Run),
    {
        let mut slot = self.runs.get_mut(id)?;
        if slot.run.is_terminal() {
            warn!(run_id = %id, "ignoring update to a completed run");
            return Some(slot.run.clone());
        }

        let started_at = slot.run.started_at;
        transform(&mut slot.run);
        slot.run.id = id.clone();
        slot.run.started_at = started_at;

        Some(slot.run.clone())
    }

    /// Appends one log entry stamped with the current time.
    pub fn append_log(
        &self,
        id: &RunId,
        level: LogLevel,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Option<Run> {
        let entry = LogEntry::now(level, message, details);
        self.update(id, move |run| run.logs.push(entry))
    }

    /// Merges `patch` into the run and stamps `completed_at`.
    ///
    /// Once stamped, `completed_at` never moves.
    pub fn complete(&self, id: &RunId, patch: RunPatch) -> Option<Run> {
        self.update(id, move |run| {
            patch.apply_to(run);
            run.completed_at = Some(Utc::now());
        })
    }

    /// All runs, most recently started first.
    pub fn list(&self) -> Vec<Run> {
        let mut slots: Vec<(u64, Run)> = self
            .runs
            .iter()
            .map(|entry| (entry.seq, entry.run.clone()))
            .collect();
        slots.sort_by(|(a_seq, a), (b_seq, b)| {
            b.started_at
                .cmp(&a.started_at)
                .then_with(|| b_seq.cmp(a_seq))
        });
        slots.into_iter().map(|(_, run)| run).collect()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
