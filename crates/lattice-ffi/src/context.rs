//! Crypto context: the parent of every key and ciphertext

use std::fmt;

use crate::ciphertext::Ciphertext;
use crate::engine::Engine;
use crate::error::{FfiError, FfiResult, HandleKind};
use crate::handle::Handle;
use crate::keys::{KeyPair, PublicKey, SecretKey};
use crate::params::ContextParams;

/// A native crypto context bound to one immutable parameter set.
///
/// Keys and ciphertexts borrow the context they were created under, so the
/// context cannot be released or dropped while any of them is still alive.
pub struct Context<E: Engine> {
    engine: E,
    params: ContextParams,
    handle: Handle<E::Context>,
}

impl<E: Engine + Default> Context<E> {
    /// Create a context on the default instance of `E`
    pub fn new(depth: u32, plaintext_modulus: u64) -> FfiResult<Self> {
        Self::with_engine(E::default(), ContextParams::new(depth, plaintext_modulus))
    }
}

impl<E: Engine> Context<E> {
    pub fn with_engine(engine: E, params: ContextParams) -> FfiResult<Self> {
        params.validate()?;

        let raw = engine.create_context(&params).ok_or_else(|| {
            FfiError::ContextCreation(format!(
                "{} rejected depth={} plaintext_modulus={}",
                engine.name(),
                params.depth,
                params.plaintext_modulus
            ))
        })?;

        tracing::debug!(
            engine = engine.name(),
            depth = params.depth,
            plaintext_modulus = params.plaintext_modulus,
            "created context"
        );

        Ok(Self {
            engine,
            params,
            handle: Handle::new(HandleKind::Context, raw),
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn params(&self) -> ContextParams {
        self.params
    }

    pub fn is_released(&self) -> bool {
        !self.handle.is_live()
    }

    /// Free the native context. Idempotent.
    pub fn release(&mut self) {
        self.handle.release();
    }

    pub(crate) fn raw(&self, op: &'static str) -> FfiResult<&E::Context> {
        self.handle.get(op)
    }

    /// Flag (but do not reject) an object created under a different context.
    pub(crate) fn warn_if_foreign(&self, origin: &Context<E>, kind: HandleKind, op: &'static str) {
        if !std::ptr::eq(origin, self) {
            tracing::warn!(%kind, op, "handle was created under a different context");
        }
    }

    /// Generate a fresh key pair.
    ///
    /// If the engine produces only one half, that half is released before the
    /// error is returned.
    pub fn generate_keypair(&self) -> FfiResult<KeyPair<'_, E>> {
        let raw = self.raw("generate_keypair")?;

        match self.engine.keygen(raw) {
            (Some(pk), Some(sk)) => Ok(KeyPair {
                public: PublicKey::from_raw(self, pk),
                secret: SecretKey::from_raw(self, sk),
            }),
            (pk, sk) => {
                let missing = match (&pk, &sk) {
                    (None, None) => "neither key",
                    (None, Some(_)) => "no public key",
                    _ => "no secret key",
                };
                if let Some(pk) = pk {
                    tracing::warn!("releasing public key from partial key generation");
                    drop(pk);
                }
                if let Some(sk) = sk {
                    tracing::warn!("releasing secret key from partial key generation");
                    drop(sk);
                }
                Err(FfiError::KeyGeneration(format!(
                    "{} returned {missing}",
                    self.engine.name()
                )))
            }
        }
    }

    /// Encrypt a scalar. The engine reduces `value` modulo the plaintext modulus.
    pub fn encrypt(&self, pk: &PublicKey<'_, E>, value: u64) -> FfiResult<Ciphertext<'_, E>> {
        const OP: &str = "encrypt";
        let raw = self.raw(OP)?;
        let pk_raw = pk.raw(OP)?;
        self.warn_if_foreign(pk.context(), HandleKind::PublicKey, OP);

        let ct = self
            .engine
            .encrypt(raw, pk_raw, value)
            .ok_or_else(|| FfiError::Encryption(format!("{} returned no ciphertext", self.engine.name())))?;

        Ok(Ciphertext::from_raw(self, ct))
    }

    /// Decrypt a scalar.
    ///
    /// A key or ciphertext from a mismatched context still decrypts to some
    /// value; that is caller error and is not detected here.
    pub fn decrypt(&self, sk: &SecretKey<'_, E>, ct: &Ciphertext<'_, E>) -> FfiResult<u64> {
        const OP: &str = "decrypt";
        let raw = self.raw(OP)?;
        let sk_raw = sk.raw(OP)?;
        let ct_raw = ct.raw(OP)?;
        self.warn_if_foreign(sk.context(), HandleKind::SecretKey, OP);
        self.warn_if_foreign(ct.context(), HandleKind::Ciphertext, OP);

        self.engine
            .decrypt(raw, sk_raw, ct_raw)
            .ok_or(FfiError::Decryption { op: OP })
    }
}

impl<E: Engine> fmt::Debug for Context<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("engine", &self.engine.name())
            .field("params", &self.params)
            .field("released", &self.is_released())
            .finish()
    }
}
