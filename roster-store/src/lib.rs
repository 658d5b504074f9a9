//! # roster-store — Async student collection store
//!
//! Holds the canonical set of student records and applies create / update /
//! delete with simulated round-trip latency, so callers are written against
//! an async interface that a real backend could later sit behind.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  create/update/delete  ┌─────────────────┐
//! │ RosterSession│ ─────────────────────► │ CollectionStore │
//! │ (term, sort) │                        │ (canonical set) │
//! └──────┬───────┘ ◄──── watch channel ── └─────────────────┘
//!        │              (Arc snapshots)
//!        ▼
//!   derived view = sort(filter(snapshot, term), key, order)
//! ```
//!
//! ## Modules
//!
//! - [`store`] — copy-on-write canonical set with latency and change notification
//! - [`session`] — list-view state: search term, sort toggle, derived view

pub mod session;
pub mod store;

pub use session::RosterSession;
pub use store::{CollectionStore, Snapshot, StoreConfig, StoreStats};
