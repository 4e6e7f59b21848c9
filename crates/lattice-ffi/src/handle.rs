//! Single-owner slot for one native object
//!
//! A `Handle` is either live (holds the owned native value) or released
//! (holds nothing). Releasing drops the native value, which runs its
//! destructor; the slot is emptied first so the destructor can only ever run
//! once. Every accessor checks the slot and reports `InvalidHandle` instead of
//! touching a released object.

use crate::error::{FfiError, FfiResult, HandleKind};

pub(crate) struct Handle<T> {
    kind: HandleKind,
    raw: Option<T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(kind: HandleKind, raw: T) -> Self {
        Self {
            kind,
            raw: Some(raw),
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.raw.is_some()
    }

    pub(crate) fn get(&self, op: &'static str) -> FfiResult<&T> {
        self.raw.as_ref().ok_or(FfiError::InvalidHandle {
            kind: self.kind,
            op,
        })
    }

    pub(crate) fn get_mut(&mut self, op: &'static str) -> FfiResult<&mut T> {
        let kind = self.kind;
        self.raw
            .as_mut()
            .ok_or(FfiError::InvalidHandle { kind, op })
    }

    /// Drop the native object. Returns false if it was already released.
    pub(crate) fn release(&mut self) -> bool {
        match self.raw.take() {
            Some(raw) => {
                drop(raw);
                tracing::trace!(kind = %self.kind, "released native handle");
                true
            }
            None => false,
        }
    }
}

impl<T> Drop for Handle<T> {
    fn drop(&mut self) {
        self.release();
    }
}
