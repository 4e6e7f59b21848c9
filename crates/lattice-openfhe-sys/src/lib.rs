//! Minimal OpenFHE bindings for scalar BGVrns evaluation
//!
//! This crate provides the raw FFI layer to OpenFHE, exposing only the
//! functions needed to create a context, generate keys, encrypt/decrypt a
//! `u64`, add ciphertexts in place, and move objects through OpenFHE's
//! binary serializer.
//!
//! Every factory returns a `UniquePtr`; a null pointer means the C++ side
//! caught an exception. Higher-level safe wrappers are provided by
//! `lattice-ffi`.

#[cfg(feature = "openfhe")]
#[cxx::bridge(namespace = "lattice_openfhe")]
pub mod ffi {
    unsafe extern "C++" {
        include!("lattice-openfhe-sys/src/wrapper.h");

        // Opaque types (defined in C++ with complete definitions)
        type CryptoContext;
        type KeyPair;
        type PublicKey;
        type PrivateKey;
        type Ciphertext;

        // Context creation
        fn create_bgvrns_context(depth: u32, plaintext_modulus: u64) -> UniquePtr<CryptoContext>;
        fn get_plaintext_modulus(ctx: &CryptoContext) -> u64;

        // Key generation
        fn keygen(ctx: &CryptoContext) -> UniquePtr<KeyPair>;
        fn get_public_key(kp: &KeyPair) -> UniquePtr<PublicKey>;
        fn get_private_key(kp: &KeyPair) -> UniquePtr<PrivateKey>;

        // Encryption/Decryption of a single scalar (slot 0)
        fn encrypt_u64(ctx: &CryptoContext, pk: &PublicKey, value: u64) -> UniquePtr<Ciphertext>;
        fn decrypt_u64(ctx: &CryptoContext, sk: &PrivateKey, ct: &Ciphertext) -> Result<u64>;

        // Evaluation
        fn eval_add_inplace(
            ctx: &CryptoContext,
            acc: Pin<&mut Ciphertext>,
            other: &Ciphertext,
        ) -> Result<()>;

        // Serialization (buffers are owned by C++ until dropped)
        fn serialize_public_key(pk: &PublicKey) -> UniquePtr<CxxVector<u8>>;
        fn deserialize_public_key(ctx: &CryptoContext, data: &[u8]) -> UniquePtr<PublicKey>;
        fn serialize_private_key(sk: &PrivateKey) -> UniquePtr<CxxVector<u8>>;
        fn deserialize_private_key(ctx: &CryptoContext, data: &[u8]) -> UniquePtr<PrivateKey>;
        fn serialize_ciphertext(ct: &Ciphertext) -> UniquePtr<CxxVector<u8>>;
        fn deserialize_ciphertext(ctx: &CryptoContext, data: &[u8]) -> UniquePtr<Ciphertext>;
    }
}

#[cfg(feature = "openfhe")]
pub use ffi::*;
