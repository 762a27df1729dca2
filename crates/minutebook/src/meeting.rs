//! Core record types for minutebook.
//!
//! This module defines the meeting record and its owned subrecords
//! (participants and tasks), along with the draft and patch shapes used by
//! the write paths.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::id;

/// A person listed as present in a meeting.
///
/// Participants are owned exclusively by their parent meeting; there is no
/// cross-meeting sharing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier for this participant.
    #[serde(default, deserialize_with = "null_to_default")]
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Participant {
    /// Create a participant with a freshly generated identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: id::generate(),
            name: name.into(),
        }
    }
}

/// An assignable, completable action item attached to a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier. Filled in by normalization when a caller omits it.
    #[serde(default, deserialize_with = "null_to_default")]
    pub id: String,
    /// What needs to be done.
    pub description: String,
    /// Free-text name of the person responsible (not a foreign key).
    #[serde(default, deserialize_with = "null_to_default")]
    pub assignee: String,
    /// Completion state. Absent or null deserializes as pending.
    #[serde(default, deserialize_with = "null_to_default")]
    pub completed: bool,
}

impl Task {
    /// Create a pending task with a freshly generated identifier.
    #[must_use]
    pub fn new(description: impl Into<String>, assignee: impl Into<String>) -> Self {
        Self {
            id: id::generate(),
            description: description.into(),
            assignee: assignee.into(),
            completed: false,
        }
    }

    /// Ensure the task has an identifier.
    fn normalize(&mut self) {
        if self.id.trim().is_empty() {
            self.id = id::generate();
        }
    }
}

/// One meeting-minutes record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique identifier, immutable after creation.
    pub id: String,
    /// Meeting title.
    pub title: String,
    /// Calendar date of the meeting.
    pub date: NaiveDate,
    /// People present, in the order they were added.
    #[serde(default, deserialize_with = "null_to_default")]
    pub participants: Vec<Participant>,
    /// Topics discussed, in order.
    #[serde(default, deserialize_with = "null_to_default")]
    pub topics: Vec<String>,
    /// Decisions reached, in order.
    #[serde(default, deserialize_with = "null_to_default")]
    pub decisions: Vec<String>,
    /// Action items. Always a well-formed sequence after any read or write.
    #[serde(default, deserialize_with = "null_to_default")]
    pub tasks: Vec<Task>,
    /// Optional signature image data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Optional QR code data.
    #[serde(rename = "qrCode", skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    /// When this record was created, immutable after creation.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// When this record was last mutated (including task toggles).
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    /// Build a new record from form data.
    ///
    /// Assigns a fresh identifier, stamps both timestamps to now, and
    /// normalizes the task list.
    #[must_use]
    pub fn from_draft(draft: MeetingDraft) -> Self {
        let now = Utc::now();
        let mut meeting = Self {
            id: id::generate(),
            title: draft.title,
            date: draft.date,
            participants: draft.participants,
            topics: draft.topics,
            decisions: draft.decisions,
            tasks: draft.tasks,
            signature: draft.signature,
            qr_code: draft.qr_code,
            created_at: now,
            updated_at: now,
        };
        meeting.normalize_tasks();
        meeting
    }

    /// Shallow-merge a patch over this record.
    ///
    /// Fields omitted from the patch are left untouched. Supplying a task
    /// list re-normalizes it. Refreshes `updated_at`.
    pub fn apply_patch(&mut self, patch: MeetingPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(participants) = patch.participants {
            self.participants = participants;
        }
        if let Some(topics) = patch.topics {
            self.topics = topics;
        }
        if let Some(decisions) = patch.decisions {
            self.decisions = decisions;
        }
        if let Some(tasks) = patch.tasks {
            self.tasks = tasks;
            self.normalize_tasks();
        }
        if let Some(signature) = patch.signature {
            self.signature = Some(signature);
        }
        if let Some(qr_code) = patch.qr_code {
            self.qr_code = Some(qr_code);
        }
        self.updated_at = Utc::now();
    }

    /// Ensure every task carries an identifier.
    pub fn normalize_tasks(&mut self) {
        for task in &mut self.tasks {
            task.normalize();
        }
    }

    /// Count of tasks not yet completed.
    #[must_use]
    pub fn open_task_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    /// The fixed demonstration record seeded on first run.
    #[must_use]
    pub fn demo() -> Self {
        let now = Utc::now();
        Self {
            id: id::generate(),
            title: "Prueba 1 - Ejemplo".to_string(),
            date: now.date_naive(),
            participants: vec![
                Participant::new("Nombre 1"),
                Participant::new("Nombre 2"),
                Participant::new("Nombre 3"),
            ],
            topics: vec![
                "Ejemplo de tema 1".to_string(),
                "Ejemplo de tema 2".to_string(),
                "Ejemplo de tema 3".to_string(),
            ],
            decisions: vec![
                "Esto es una prueba de uso de decisiones".to_string(),
                "Esto es otra prueba de uso de decisiones".to_string(),
                "Esto es una tercera prueba de uso de decisiones".to_string(),
            ],
            tasks: vec![
                Task::new("Ejemplo de tema 1", "Nombre 1"),
                Task {
                    completed: true,
                    ..Task::new("Ejemplo de tema 2", "Nombre 2")
                },
                Task::new("Ejemplo de tema 3", "Nombre 3"),
            ],
            signature: None,
            qr_code: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Form data for creating a record: a meeting minus its identifier and
/// timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDraft {
    /// Meeting title.
    #[serde(default)]
    pub title: String,
    /// Calendar date of the meeting.
    #[serde(default = "today")]
    pub date: NaiveDate,
    /// People present.
    #[serde(default, deserialize_with = "null_to_default")]
    pub participants: Vec<Participant>,
    /// Topics discussed.
    #[serde(default, deserialize_with = "null_to_default")]
    pub topics: Vec<String>,
    /// Decisions reached.
    #[serde(default, deserialize_with = "null_to_default")]
    pub decisions: Vec<String>,
    /// Action items.
    #[serde(default, deserialize_with = "null_to_default")]
    pub tasks: Vec<Task>,
    /// Optional signature image data.
    #[serde(default)]
    pub signature: Option<String>,
    /// Optional QR code data.
    #[serde(default, rename = "qrCode")]
    pub qr_code: Option<String>,
}

/// A partial update: only the supplied fields are merged over the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingPatch {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Replacement participant list.
    #[serde(default)]
    pub participants: Option<Vec<Participant>>,
    /// Replacement topic list.
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    /// Replacement decision list.
    #[serde(default)]
    pub decisions: Option<Vec<String>>,
    /// Replacement task list (re-normalized on merge).
    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
    /// Replacement signature.
    #[serde(default)]
    pub signature: Option<String>,
    /// Replacement QR code.
    #[serde(default, rename = "qrCode")]
    pub qr_code: Option<String>,
}

/// Deserialize `null` (or an absent field, via `#[serde(default)]`) as the
/// type's default. Legacy blobs stored `"tasks": null` for records written
/// before the task list existed.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
