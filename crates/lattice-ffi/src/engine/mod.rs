//! Native engine seam
//!
//! An [`Engine`] is the capability provider behind the boundary layer. Each
//! associated type is an owned native object: dropping it is the native
//! destructor. Every factory returns `None` where the native library would
//! hand back a null pointer. This layer never looks inside these values.

pub mod mock;
#[cfg(feature = "openfhe")]
pub mod openfhe;

pub use mock::{MockEngine, MockFault, MockStats};
#[cfg(feature = "openfhe")]
pub use openfhe::OpenFheEngine;

use crate::params::ContextParams;

pub trait Engine {
    type Context;
    type PublicKey;
    type SecretKey;
    type Ciphertext;
    /// Serializer output, owned by the engine until dropped
    type Buffer: AsRef<[u8]>;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn create_context(&self, params: &ContextParams) -> Option<Self::Context>;

    /// Either half may come back null independently.
    fn keygen(&self, ctx: &Self::Context) -> (Option<Self::PublicKey>, Option<Self::SecretKey>);

    fn encrypt(
        &self,
        ctx: &Self::Context,
        pk: &Self::PublicKey,
        value: u64,
    ) -> Option<Self::Ciphertext>;

    /// `None` only if the engine raised an error; a mismatched key still yields a value.
    fn decrypt(&self, ctx: &Self::Context, sk: &Self::SecretKey, ct: &Self::Ciphertext)
        -> Option<u64>;

    /// `acc += other`. Returns false if the engine raised an error.
    fn eval_add_in_place(
        &self,
        ctx: &Self::Context,
        acc: &mut Self::Ciphertext,
        other: &Self::Ciphertext,
    ) -> bool;

    fn serialize_public_key(&self, pk: &Self::PublicKey) -> Option<Self::Buffer>;
    fn serialize_secret_key(&self, sk: &Self::SecretKey) -> Option<Self::Buffer>;
    fn serialize_ciphertext(&self, ct: &Self::Ciphertext) -> Option<Self::Buffer>;

    fn deserialize_public_key(&self, ctx: &Self::Context, data: &[u8]) -> Option<Self::PublicKey>;
    fn deserialize_secret_key(&self, ctx: &Self::Context, data: &[u8]) -> Option<Self::SecretKey>;
    fn deserialize_ciphertext(&self, ctx: &Self::Context, data: &[u8])
        -> Option<Self::Ciphertext>;
}
