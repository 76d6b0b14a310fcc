//! Core types and sync engine for the counselcal schedule calendar.
//!
//! This crate provides:
//! - `ScheduleRecord` and the value normalizer that absorbs spreadsheet
//!   date/time quirks at the boundary
//! - `ScheduleStore`, the in-memory source of truth for the views
//! - `Reconciler`, the optimistic-update engine driving the remote proxy
//! - `query` helpers projecting the store for list and week-grid views

pub mod config;
pub mod constants;
pub mod error;
pub mod normalize;
pub mod query;
pub mod reconcile;
pub mod record;
pub mod remote;
pub mod store;

pub use error::{ScheduleError, ScheduleResult};
pub use reconcile::{Reconciler, SaveOutcome};
pub use record::{RawRecord, ScheduleRecord, SessionNumber};
pub use store::{ScheduleStore, SharedStore};
