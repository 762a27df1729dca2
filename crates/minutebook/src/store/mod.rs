//! Record store for minutebook.
//!
//! This module owns all meeting records: hydration from a storage backend,
//! demo seeding on first run, record CRUD, task-status mutation, and the
//! flush discipline that keeps memory and persisted state in step.

pub mod backend;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::meeting::{Meeting, MeetingDraft, MeetingPatch};
use crate::query;

pub use backend::{Backend, FileBackend, MemoryBackend};

/// Options controlling how a store is opened.
#[derive(Debug, Clone, Copy)]
pub struct OpenOptions {
    /// Discard any persisted data and reseed.
    pub force: bool,
    /// Seed the demonstration record when starting from empty storage.
    pub seed_demo: bool,
    /// Pretty-print the persisted JSON blob.
    pub pretty: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            force: false,
            seed_demo: true,
            pretty: false,
        }
    }
}

/// The record store.
///
/// Holds every meeting in memory for its lifetime and rewrites the whole
/// blob through its backend after each mutation. Mutations are
/// write-ahead: the candidate state is persisted first and only adopted in
/// memory once the save succeeded, so a failed flush leaves both sides at
/// the prior state.
#[derive(Debug)]
pub struct Store {
    backend: Box<dyn Backend>,
    meetings: Vec<Meeting>,
    pretty: bool,
}

impl Store {
    /// Open a store over the given backend.
    ///
    /// Hydrates the in-memory sequence from the persisted blob, normalizing
    /// every record's task list. When no blob exists yet, seeds exactly one
    /// demonstration record and flushes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or the persisted blob
    /// cannot be parsed. A malformed blob is not silently discarded; use
    /// [`Store::open_forced`] to reset it.
    pub fn open(backend: impl Backend + 'static) -> Result<Self> {
        Self::open_with(backend, OpenOptions::default())
    }

    /// Open a store, discarding any persisted data and reseeding the
    /// demonstration record.
    ///
    /// # Errors
    ///
    /// Returns an error if the reseeded blob cannot be persisted.
    pub fn open_forced(backend: impl Backend + 'static) -> Result<Self> {
        Self::open_with(
            backend,
            OpenOptions {
                force: true,
                ..OpenOptions::default()
            },
        )
    }

    /// Open a store with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable, the persisted blob
    /// cannot be parsed (unless `force` is set), or seeding cannot be
    /// flushed.
    pub fn open_with(backend: impl Backend + 'static, options: OpenOptions) -> Result<Self> {
        let mut store = Self {
            backend: Box::new(backend),
            meetings: Vec::new(),
            pretty: options.pretty,
        };

        let existing = if options.force {
            None
        } else {
            store.backend.load()?
        };

        match existing {
            Some(blob) => {
                let mut meetings: Vec<Meeting> =
                    serde_json::from_str(&blob).map_err(|source| Error::BlobParse { source })?;
                for meeting in &mut meetings {
                    meeting.normalize_tasks();
                }
                debug!("Hydrated {} meetings from {}", meetings.len(), store.backend.describe());
                store.meetings = meetings;
            }
            None => {
                if options.seed_demo {
                    store.seed()?;
                } else {
                    store.persist(&[])?;
                }
            }
        }

        Ok(store)
    }

    /// Open an in-memory store seeded with the demonstration record.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails, which the memory backend never
    /// does unless failure injection is enabled.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(MemoryBackend::new())
    }

    /// Where this store persists its blob.
    #[must_use]
    pub fn location(&self) -> String {
        self.backend.describe()
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meetings.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }

    /// All records, most recently created first.
    ///
    /// Ties on creation time keep their original insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Meeting> {
        let mut records = self.meetings.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Meeting> {
        self.meetings.iter().find(|m| m.id == id).cloned()
    }

    /// Records matching a search term, most recently created first.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<Meeting> {
        query::search(term, &self.list())
    }

    /// Create a record from form data.
    ///
    /// Assigns a fresh id, stamps both timestamps, normalizes the task
    /// list, and persists before the record becomes visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted; the store is
    /// left unchanged.
    pub fn create(&mut self, draft: MeetingDraft) -> Result<Meeting> {
        let meeting = Meeting::from_draft(draft);
        debug!("Creating meeting '{}' with {} tasks", meeting.title, meeting.tasks.len());

        let mut next = self.meetings.clone();
        next.push(meeting.clone());
        self.commit(next)?;

        info!("Created meeting {}", meeting.id);
        Ok(meeting)
    }

    /// Shallow-merge a patch over an existing record.
    ///
    /// Fields omitted from the patch are left untouched; a supplied task
    /// list is re-normalized. Refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted; the store is
    /// left unchanged. An unknown id is `Ok(None)`, not an error.
    pub fn update(&mut self, id: &str, patch: MeetingPatch) -> Result<Option<Meeting>> {
        let Some(index) = self.meetings.iter().position(|m| m.id == id) else {
            debug!("No meeting with id {id} to update");
            return Ok(None);
        };

        let mut next = self.meetings.clone();
        next[index].apply_patch(patch);
        self.commit(next)?;

        info!("Updated meeting {id}");
        Ok(Some(self.meetings[index].clone()))
    }

    /// Remove a record.
    ///
    /// Flushes only when a record was actually removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the shrunken state cannot be persisted; the
    /// store is left unchanged. An unknown id is `Ok(false)`.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut next = self.meetings.clone();
        let before = next.len();
        next.retain(|m| m.id != id);
        if next.len() == before {
            debug!("No meeting with id {id} to delete");
            return Ok(false);
        }

        self.commit(next)?;
        info!("Deleted meeting {id}");
        Ok(true)
    }

    /// Set the completion flag on one task of one meeting.
    ///
    /// Refreshes the meeting's `updated_at` on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted; the store is
    /// left unchanged. An unknown meeting or task id is `Ok(false)` and
    /// nothing is flushed.
    pub fn set_task_completion(
        &mut self,
        meeting_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<bool> {
        let Some(mi) = self.meetings.iter().position(|m| m.id == meeting_id) else {
            warn!("No meeting with id {meeting_id} for task toggle");
            return Ok(false);
        };
        let Some(ti) = self.meetings[mi].tasks.iter().position(|t| t.id == task_id) else {
            warn!("No task with id {task_id} in meeting {meeting_id}");
            return Ok(false);
        };

        let mut next = self.meetings.clone();
        next[mi].tasks[ti].completed = completed;
        next[mi].updated_at = Utc::now();
        self.commit(next)?;

        debug!(
            "Task {task_id} in meeting {meeting_id} marked {}",
            if completed { "completed" } else { "pending" }
        );
        Ok(true)
    }

    /// Summary figures over the stored records.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let total_tasks: usize = self.meetings.iter().map(|m| m.tasks.len()).sum();
        let open_tasks: usize = self.meetings.iter().map(Meeting::open_task_count).sum();

        StoreStats {
            total_meetings: self.meetings.len(),
            total_tasks,
            open_tasks,
            completed_tasks: total_tasks - open_tasks,
            oldest_created: self.meetings.iter().map(|m| m.created_at).min(),
            newest_created: self.meetings.iter().map(|m| m.created_at).max(),
        }
    }

    /// Replace all records with the single demonstration record and flush.
    fn seed(&mut self) -> Result<()> {
        info!("Seeding demonstration record");
        let next = vec![Meeting::demo()];
        self.commit(next)
    }

    /// Persist a candidate state, then adopt it in memory.
    fn commit(&mut self, next: Vec<Meeting>) -> Result<()> {
        self.persist(&next)?;
        self.meetings = next;
        Ok(())
    }

    /// Serialize records and overwrite the backend blob.
    fn persist(&self, records: &[Meeting]) -> Result<()> {
        let blob = if self.pretty {
            serde_json::to_string_pretty(records)?
        } else {
            serde_json::to_string(records)?
        };
        self.backend.save(&blob)
    }
}

/// Summary figures about the stored records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of meeting records.
    pub total_meetings: usize,
    /// Number of tasks across all records.
    pub total_tasks: usize,
    /// Tasks still pending.
    pub open_tasks: usize,
    /// Tasks marked completed.
    pub completed_tasks: usize,
    /// Creation time of the oldest record.
    pub oldest_created: Option<DateTime<Utc>>,
    /// Creation time of the newest record.
    pub newest_created: Option<DateTime<Utc>>,
}
