//! Error types for lattice-ffi operations

use std::fmt;

use thiserror::Error;

/// Which kind of native object an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Context,
    PublicKey,
    SecretKey,
    Ciphertext,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleKind::Context => write!(f, "context"),
            HandleKind::PublicKey => write!(f, "public key"),
            HandleKind::SecretKey => write!(f, "secret key"),
            HandleKind::Ciphertext => write!(f, "ciphertext"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FfiError {
    /// The handle was released (or never held a native object)
    #[error("Invalid {kind} handle passed to {op}")]
    InvalidHandle { kind: HandleKind, op: &'static str },

    /// A parameter set could not be read or written as configuration
    #[error("Invalid parameter config: {0}")]
    Config(String),

    #[error("Context creation failed: {0}")]
    ContextCreation(String),

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed in {op}")]
    Decryption { op: &'static str },

    #[error("Evaluation failed in {op}")]
    Evaluation { op: &'static str },

    #[error("Serialization of {kind} failed")]
    Serialization { kind: HandleKind },

    #[error("Deserialization of {kind} failed: {reason}")]
    Deserialization { kind: HandleKind, reason: String },
}

impl FfiError {
    /// True for any misuse of a released handle
    pub fn is_invalid_handle(&self) -> bool {
        matches!(self, FfiError::InvalidHandle { .. })
    }
}

pub type FfiResult<T> = Result<T, FfiError>;
