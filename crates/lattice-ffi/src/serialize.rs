//! Binary interchange for keys and ciphertexts
//!
//! The byte layout belongs to the engine. This layer copies exactly what the
//! native serializer produced into a caller-owned `Vec<u8>` and drops the
//! native buffer before returning; deserialization always goes through a
//! context.

use crate::ciphertext::Ciphertext;
use crate::context::Context;
use crate::engine::Engine;
use crate::error::{FfiError, FfiResult, HandleKind};
use crate::keys::{PublicKey, SecretKey};

/// An object that can cross the boundary as opaque bytes
pub trait Interchange<'ctx, E: Engine>: Sized {
    const KIND: HandleKind;

    fn to_bytes(&self) -> FfiResult<Vec<u8>>;

    fn from_bytes(ctx: &'ctx Context<E>, data: &[u8]) -> FfiResult<Self>;
}

/// Copy a native buffer into owned memory, then free it.
fn copy_out<B: AsRef<[u8]>>(kind: HandleKind, buffer: Option<B>) -> FfiResult<Vec<u8>> {
    let buffer = buffer.ok_or(FfiError::Serialization { kind })?;
    let bytes = buffer.as_ref().to_vec();
    drop(buffer);
    Ok(bytes)
}

fn import<'ctx, E, T>(
    ctx: &'ctx Context<E>,
    kind: HandleKind,
    data: &[u8],
    native: impl FnOnce(&E, &E::Context, &[u8]) -> Option<T>,
) -> FfiResult<T>
where
    E: Engine,
{
    let raw = ctx.raw("deserialize")?;
    if data.is_empty() {
        return Err(FfiError::Deserialization {
            kind,
            reason: "empty input".into(),
        });
    }

    let obj = native(ctx.engine(), raw, data).ok_or_else(|| FfiError::Deserialization {
        kind,
        reason: format!("{} rejected {} bytes", ctx.engine().name(), data.len()),
    })?;

    tracing::debug!(%kind, len = data.len(), "deserialized native object");
    Ok(obj)
}

impl<'ctx, E: Engine> PublicKey<'ctx, E> {
    /// Serialize with the engine's native format
    pub fn serialize(&self) -> FfiResult<Vec<u8>> {
        let raw = self.raw("serialize")?;
        copy_out(
            HandleKind::PublicKey,
            self.context().engine().serialize_public_key(raw),
        )
    }
}

impl<'ctx, E: Engine> SecretKey<'ctx, E> {
    pub fn serialize(&self) -> FfiResult<Vec<u8>> {
        let raw = self.raw("serialize")?;
        copy_out(
            HandleKind::SecretKey,
            self.context().engine().serialize_secret_key(raw),
        )
    }
}

impl<'ctx, E: Engine> Ciphertext<'ctx, E> {
    pub fn serialize(&self) -> FfiResult<Vec<u8>> {
        let raw = self.raw("serialize")?;
        copy_out(
            HandleKind::Ciphertext,
            self.context().engine().serialize_ciphertext(raw),
        )
    }
}

impl<'ctx, E: Engine> Interchange<'ctx, E> for PublicKey<'ctx, E> {
    const KIND: HandleKind = HandleKind::PublicKey;

    fn to_bytes(&self) -> FfiResult<Vec<u8>> {
        self.serialize()
    }

    fn from_bytes(ctx: &'ctx Context<E>, data: &[u8]) -> FfiResult<Self> {
        let raw = import(ctx, Self::KIND, data, E::deserialize_public_key)?;
        Ok(PublicKey::from_raw(ctx, raw))
    }
}

impl<'ctx, E: Engine> Interchange<'ctx, E> for SecretKey<'ctx, E> {
    const KIND: HandleKind = HandleKind::SecretKey;

    fn to_bytes(&self) -> FfiResult<Vec<u8>> {
        self.serialize()
    }

    fn from_bytes(ctx: &'ctx Context<E>, data: &[u8]) -> FfiResult<Self> {
        let raw = import(ctx, Self::KIND, data, E::deserialize_secret_key)?;
        Ok(SecretKey::from_raw(ctx, raw))
    }
}

impl<'ctx, E: Engine> Interchange<'ctx, E> for Ciphertext<'ctx, E> {
    const KIND: HandleKind = HandleKind::Ciphertext;

    fn to_bytes(&self) -> FfiResult<Vec<u8>> {
        self.serialize()
    }

    fn from_bytes(ctx: &'ctx Context<E>, data: &[u8]) -> FfiResult<Self> {
        let raw = import(ctx, Self::KIND, data, E::deserialize_ciphertext)?;
        Ok(Ciphertext::from_raw(ctx, raw))
    }
}

impl<E: Engine> Context<E> {
    /// Reconstruct any interchangeable object under this context
    pub fn deserialize<'ctx, T>(&'ctx self, data: &[u8]) -> FfiResult<T>
    where
        T: Interchange<'ctx, E>,
    {
        T::from_bytes(self, data)
    }

    pub fn deserialize_public_key(&self, data: &[u8]) -> FfiResult<PublicKey<'_, E>> {
        self.deserialize(data)
    }

    pub fn deserialize_secret_key(&self, data: &[u8]) -> FfiResult<SecretKey<'_, E>> {
        self.deserialize(data)
    }

    pub fn deserialize_ciphertext(&self, data: &[u8]) -> FfiResult<Ciphertext<'_, E>> {
        self.deserialize(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MockEngine, MockFault};
    use crate::params::ContextParams;

    #[test]
    fn test_ciphertext_roundtrip_same_context() {
        let ctx = Context::<MockEngine>::new(2, 65537).unwrap();
        let kp = ctx.generate_keypair().unwrap();
        let ct = ctx.encrypt(&kp.public, 7).unwrap();

        let bytes = ct.serialize().unwrap();
        let restored = ctx.deserialize_ciphertext(&bytes).unwrap();
        assert_eq!(ctx.decrypt(&kp.secret, &restored).unwrap(), 7);
    }

    #[test]
    fn test_serialize_is_exact_copy_of_native_bytes() {
        let ctx = Context::<MockEngine>::new(2, 65537).unwrap();
        let kp = ctx.generate_keypair().unwrap();
        let ct = ctx.encrypt(&kp.public, 7).unwrap();

        let native = ctx
            .engine()
            .serialize_ciphertext(ct.raw("test").unwrap())
            .unwrap();
        assert_eq!(ct.serialize().unwrap(), native[..].to_vec());
    }

    #[test]
    fn test_generic_deserialize() {
        let ctx = Context::<MockEngine>::new(2, 65537).unwrap();
        let kp = ctx.generate_keypair().unwrap();
        let bytes = kp.public.to_bytes().unwrap();

        let pk: PublicKey<'_, MockEngine> = ctx.deserialize(&bytes).unwrap();
        let ct = ctx.encrypt(&pk, 11).unwrap();
        assert_eq!(ctx.decrypt(&kp.secret, &ct).unwrap(), 11);
    }

    #[test]
    fn test_empty_input_skips_native_call() {
        let engine = MockEngine::new();
        let stats = engine.stats();
        let ctx = Context::with_engine(engine, ContextParams::default()).unwrap();
        let calls = stats.native_calls();

        let err = ctx.deserialize_secret_key(&[]).unwrap_err();
        assert_eq!(
            err,
            FfiError::Deserialization {
                kind: HandleKind::SecretKey,
                reason: "empty input".into(),
            }
        );
        assert_eq!(stats.native_calls(), calls);
    }

    #[test]
    fn test_wrong_object_type_fails() {
        let ctx = Context::<MockEngine>::new(2, 65537).unwrap();
        let kp = ctx.generate_keypair().unwrap();
        let pk_bytes = kp.public.serialize().unwrap();

        let err = ctx.deserialize_ciphertext(&pk_bytes).unwrap_err();
        assert!(matches!(
            err,
            FfiError::Deserialization {
                kind: HandleKind::Ciphertext,
                ..
            }
        ));
    }

    #[test]
    fn test_released_context_cannot_deserialize() {
        let (pk_bytes, mut ctx) = {
            let ctx = Context::<MockEngine>::new(2, 65537).unwrap();
            let bytes = ctx.generate_keypair().unwrap().public.serialize().unwrap();
            (bytes, ctx)
        };
        ctx.release();

        let err = ctx.deserialize_public_key(&pk_bytes).unwrap_err();
        assert_eq!(
            err,
            FfiError::InvalidHandle {
                kind: HandleKind::Context,
                op: "deserialize",
            }
        );
    }

    #[test]
    fn test_null_native_buffer_is_serialization_failure() {
        let engine = MockEngine::new().with_fault(MockFault::Serialization);
        let ctx = Context::with_engine(engine, ContextParams::default()).unwrap();
        let kp = ctx.generate_keypair().unwrap();

        assert_eq!(
            kp.public.serialize().unwrap_err(),
            FfiError::Serialization {
                kind: HandleKind::PublicKey,
            }
        );
    }

    #[test]
    fn test_released_key_cannot_serialize() {
        let ctx = Context::<MockEngine>::new(2, 65537).unwrap();
        let mut kp = ctx.generate_keypair().unwrap();
        kp.secret.release();

        assert_eq!(
            kp.secret.serialize().unwrap_err(),
            FfiError::InvalidHandle {
                kind: HandleKind::SecretKey,
                op: "serialize",
            }
        );
    }
}
