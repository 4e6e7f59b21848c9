//! lattice-ffi: safe handles for native homomorphic-encryption objects
//!
//! Every context, key, and ciphertext is an opaque object owned by a native
//! engine. This crate wraps each one in a single-owner handle that releases it
//! exactly once, rejects use after release with [`FfiError::InvalidHandle`],
//! and moves objects in and out of the engine's binary format without
//! interpreting the bytes.
//!
//! # Architecture
//!
//! ```text
//! lattice-ffi (this crate - safe handles, errors, serialization bridge)
//!     ├── engine::MockEngine (in-process, testing only)
//!     └── engine::OpenFheEngine (feature `openfhe`)
//!             └── lattice-openfhe-sys (raw CXX FFI to OpenFHE BGVrns)
//! ```
//!
//! # Example
//!
//! ```rust
//! use lattice_ffi::{Context, engine::MockEngine};
//!
//! # fn main() -> Result<(), lattice_ffi::FfiError> {
//! let ctx = Context::<MockEngine>::new(2, 65537)?;
//! let kp = ctx.generate_keypair()?;
//!
//! let mut acc = ctx.encrypt(&kp.public, 10)?;
//! let other = ctx.encrypt(&kp.public, 32)?;
//! ctx.eval_add(&mut acc, &other)?;
//!
//! assert_eq!(ctx.decrypt(&kp.secret, &acc)?, 42);
//!
//! // Bytes move between contexts with identical parameters
//! let sk_bytes = kp.secret.serialize()?;
//! let ct_bytes = acc.serialize()?;
//!
//! let peer = Context::<MockEngine>::new(2, 65537)?;
//! let sk = peer.deserialize_secret_key(&sk_bytes)?;
//! let restored = peer.deserialize_ciphertext(&ct_bytes)?;
//! assert_eq!(peer.decrypt(&sk, &restored)?, 42);
//! # Ok(())
//! # }
//! ```
//!
//! # Threading
//!
//! All calls are synchronous. Whether a context may be shared across threads
//! follows from the engine's object types; OpenFHE objects are neither `Send`
//! nor `Sync`, so callers needing concurrency must guard a context (and all
//! handles derived from it) with one lock.

pub mod ciphertext;
pub mod context;
pub mod engine;
pub mod error;
mod eval;
mod handle;
pub mod keys;
pub mod params;
pub mod serialize;

// Re-exports for convenience
pub use ciphertext::Ciphertext;
pub use context::Context;
pub use engine::Engine;
pub use error::{FfiError, FfiResult, HandleKind};
pub use keys::{KeyPair, PublicKey, SecretKey};
pub use params::ContextParams;
pub use serialize::Interchange;
