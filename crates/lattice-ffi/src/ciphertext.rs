//! Ciphertext handles

use std::fmt;

use crate::context::Context;
use crate::engine::Engine;
use crate::error::{FfiResult, HandleKind};
use crate::handle::Handle;

/// An encrypted `u64` under one context's plaintext modulus.
///
/// Evaluation operations mutate the native object in place; the handle
/// itself stays the same.
pub struct Ciphertext<'ctx, E: Engine> {
    ctx: &'ctx Context<E>,
    handle: Handle<E::Ciphertext>,
}

impl<'ctx, E: Engine> Ciphertext<'ctx, E> {
    pub(crate) fn from_raw(ctx: &'ctx Context<E>, raw: E::Ciphertext) -> Self {
        Self {
            ctx,
            handle: Handle::new(HandleKind::Ciphertext, raw),
        }
    }

    pub(crate) fn raw(&self, op: &'static str) -> FfiResult<&E::Ciphertext> {
        self.handle.get(op)
    }

    pub(crate) fn raw_mut(&mut self, op: &'static str) -> FfiResult<&mut E::Ciphertext> {
        self.handle.get_mut(op)
    }

    pub fn context(&self) -> &'ctx Context<E> {
        self.ctx
    }

    pub fn is_released(&self) -> bool {
        !self.handle.is_live()
    }

    /// Free the native ciphertext. Idempotent.
    pub fn release(&mut self) {
        self.handle.release();
    }
}

impl<E: Engine> fmt::Debug for Ciphertext<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ciphertext")
            .field("released", &self.is_released())
            .finish()
    }
}
