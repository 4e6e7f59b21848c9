//! Public and secret key handles

use std::fmt;

use crate::context::Context;
use crate::engine::Engine;
use crate::error::{FfiResult, HandleKind};
use crate::handle::Handle;

/// A public key for encryption
pub struct PublicKey<'ctx, E: Engine> {
    ctx: &'ctx Context<E>,
    handle: Handle<E::PublicKey>,
}

/// A secret key for decryption
pub struct SecretKey<'ctx, E: Engine> {
    ctx: &'ctx Context<E>,
    handle: Handle<E::SecretKey>,
}

/// A keypair containing both public and secret keys.
///
/// The halves are independently owned; releasing one leaves the other usable.
pub struct KeyPair<'ctx, E: Engine> {
    pub public: PublicKey<'ctx, E>,
    pub secret: SecretKey<'ctx, E>,
}

impl<'ctx, E: Engine> KeyPair<'ctx, E> {
    pub fn into_parts(self) -> (PublicKey<'ctx, E>, SecretKey<'ctx, E>) {
        (self.public, self.secret)
    }
}

impl<'ctx, E: Engine> PublicKey<'ctx, E> {
    pub(crate) fn from_raw(ctx: &'ctx Context<E>, raw: E::PublicKey) -> Self {
        Self {
            ctx,
            handle: Handle::new(HandleKind::PublicKey, raw),
        }
    }

    pub(crate) fn raw(&self, op: &'static str) -> FfiResult<&E::PublicKey> {
        self.handle.get(op)
    }

    /// The context this key was created or deserialized under
    pub fn context(&self) -> &'ctx Context<E> {
        self.ctx
    }

    pub fn is_released(&self) -> bool {
        !self.handle.is_live()
    }

    /// Free the native key. Idempotent.
    pub fn release(&mut self) {
        self.handle.release();
    }
}

impl<'ctx, E: Engine> SecretKey<'ctx, E> {
    pub(crate) fn from_raw(ctx: &'ctx Context<E>, raw: E::SecretKey) -> Self {
        Self {
            ctx,
            handle: Handle::new(HandleKind::SecretKey, raw),
        }
    }

    pub(crate) fn raw(&self, op: &'static str) -> FfiResult<&E::SecretKey> {
        self.handle.get(op)
    }

    pub fn context(&self) -> &'ctx Context<E> {
        self.ctx
    }

    pub fn is_released(&self) -> bool {
        !self.handle.is_live()
    }

    /// Free the native key. Idempotent.
    pub fn release(&mut self) {
        self.handle.release();
    }
}

impl<E: Engine> fmt::Debug for PublicKey<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("released", &self.is_released())
            .finish()
    }
}

impl<E: Engine> fmt::Debug for SecretKey<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("released", &self.is_released())
            .finish_non_exhaustive()
    }
}

impl<E: Engine> fmt::Debug for KeyPair<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .field("secret", &self.secret)
            .finish_non_exhaustive()
    }
}
