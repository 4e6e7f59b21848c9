//! OpenFHE BGVrns engine (post-quantum, lattice-based)
//!
//! Scalars are packed into slot 0 of a packed plaintext. Keys and ciphertexts
//! are serialized via OpenFHE's binary format.

use cxx::{CxxVector, UniquePtr};
use lattice_openfhe_sys::ffi;

use super::Engine;
use crate::params::ContextParams;

/// Native buffer from OpenFHE's serializer; dropping it frees the C++ vector.
pub struct NativeBuffer(UniquePtr<CxxVector<u8>>);

impl AsRef<[u8]> for NativeBuffer {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref().map(CxxVector::as_slice).unwrap_or(&[])
    }
}

/// Map a null `UniquePtr` to the sentinel `None`
fn non_null<T>(ptr: UniquePtr<T>) -> Option<UniquePtr<T>>
where
    T: cxx::memory::UniquePtrTarget,
{
    (!ptr.is_null()).then_some(ptr)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenFheEngine;

impl Engine for OpenFheEngine {
    type Context = UniquePtr<ffi::CryptoContext>;
    type PublicKey = UniquePtr<ffi::PublicKey>;
    type SecretKey = UniquePtr<ffi::PrivateKey>;
    type Ciphertext = UniquePtr<ffi::Ciphertext>;
    type Buffer = NativeBuffer;

    fn name(&self) -> &'static str {
        "OpenFHE BGVrns"
    }

    fn create_context(&self, params: &ContextParams) -> Option<Self::Context> {
        non_null(ffi::create_bgvrns_context(
            params.depth,
            params.plaintext_modulus,
        ))
    }

    fn keygen(&self, ctx: &Self::Context) -> (Option<Self::PublicKey>, Option<Self::SecretKey>) {
        let kp = ffi::keygen(ctx);
        let Some(kp) = kp.as_ref() else {
            return (None, None);
        };
        // The pair object is freed here; both halves hold their own shared_ptr.
        (
            non_null(ffi::get_public_key(kp)),
            non_null(ffi::get_private_key(kp)),
        )
    }

    fn encrypt(&self, ctx: &Self::Context, pk: &Self::PublicKey, value: u64) -> Option<Self::Ciphertext> {
        non_null(ffi::encrypt_u64(ctx, pk, value))
    }

    fn decrypt(&self, ctx: &Self::Context, sk: &Self::SecretKey, ct: &Self::Ciphertext) -> Option<u64> {
        match ffi::decrypt_u64(ctx, sk, ct) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "OpenFHE decryption raised");
                None
            }
        }
    }

    fn eval_add_in_place(
        &self,
        ctx: &Self::Context,
        acc: &mut Self::Ciphertext,
        other: &Self::Ciphertext,
    ) -> bool {
        match ffi::eval_add_inplace(ctx, acc.pin_mut(), other) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "OpenFHE EvalAddInPlace raised");
                false
            }
        }
    }

    fn serialize_public_key(&self, pk: &Self::PublicKey) -> Option<NativeBuffer> {
        non_null(ffi::serialize_public_key(pk)).map(NativeBuffer)
    }

    fn serialize_secret_key(&self, sk: &Self::SecretKey) -> Option<NativeBuffer> {
        non_null(ffi::serialize_private_key(sk)).map(NativeBuffer)
    }

    fn serialize_ciphertext(&self, ct: &Self::Ciphertext) -> Option<NativeBuffer> {
        non_null(ffi::serialize_ciphertext(ct)).map(NativeBuffer)
    }

    fn deserialize_public_key(&self, ctx: &Self::Context, data: &[u8]) -> Option<Self::PublicKey> {
        non_null(ffi::deserialize_public_key(ctx, data))
    }

    fn deserialize_secret_key(&self, ctx: &Self::Context, data: &[u8]) -> Option<Self::SecretKey> {
        non_null(ffi::deserialize_private_key(ctx, data))
    }

    fn deserialize_ciphertext(&self, ctx: &Self::Context, data: &[u8]) -> Option<Self::Ciphertext> {
        non_null(ffi::deserialize_ciphertext(ctx, data))
    }
}
