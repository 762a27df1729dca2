//! `minutebook` - A local record keeper for meeting minutes
//!
//! This library provides the core functionality for keeping meeting records:
//! participants, discussed topics, decisions, and assignable tasks with
//! completion state, persisted as a single JSON blob.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod id;
pub mod logging;
pub mod meeting;
pub mod query;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use meeting::{Meeting, MeetingDraft, MeetingPatch, Participant, Task};
pub use store::{Backend, FileBackend, MemoryBackend, OpenOptions, Store, StoreStats};
