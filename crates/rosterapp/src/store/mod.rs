//! # Storage Layer
//!
//! This module defines the storage abstraction for rosterapp. The [`DataStore`] trait
//! is the seam between the command layer and wherever the students actually live.
//!
//! ## Contract
//!
//! A store is an **ordered** collection of [`Student`]s:
//! - Insertion order is preserved; `list()` returns records oldest-first.
//! - No two records share an `id` (case-insensitive comparison).
//! - Mutations are all-or-nothing per record: a failed call leaves the store untouched.
//!
//! ## Change Notification
//!
//! Dependent views (filtered lists, dashboard numbers, chart series) are never
//! maintained incrementally. Instead, a store invokes every registered [`Observer`]
//! with the full record sequence after each successful mutation, and consumers
//! recompute from scratch. Failed mutations notify nobody.
//!
//! ## Implementations
//!
//! - [`registry::Registry`]: the in-memory registry. There is no persistence; data
//!   lives for the lifetime of the process.

use crate::error::Result;
use crate::model::{Student, StudentAttrs};

pub mod registry;

/// Callback invoked with the complete record sequence after every successful mutation.
pub type Observer = Box<dyn FnMut(&[Student])>;

pub trait DataStore {
    /// Appends a record. Fails with `DuplicateId` if the id is already taken.
    fn insert(&mut self, student: Student) -> Result<()>;

    /// Replaces every mutable attribute of the record matching `id`.
    ///
    /// `attrs.id` may rename the record; it must not collide with any *other* record.
    fn replace(&mut self, id: &str, attrs: StudentAttrs) -> Result<()>;

    /// Removes the record matching `id`, returning it.
    fn remove(&mut self, id: &str) -> Result<Student>;

    fn get(&self, id: &str) -> Result<&Student>;

    /// All records, in insertion order.
    fn list(&self) -> &[Student];

    fn contains_id(&self, id: &str) -> bool {
        self.list().iter().any(|s| s.has_id(id))
    }

    fn subscribe(&mut self, observer: Observer);
}
