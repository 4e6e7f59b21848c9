//! End-to-end tests against OpenFHE BGVrns (requires the `openfhe` feature)

#![cfg(feature = "openfhe")]

use lattice_ffi::engine::OpenFheEngine;
use lattice_ffi::Context;

const DEPTH: u32 = 2;
const MODULUS: u64 = 65537;
const MSG: u64 = 42;

#[test]
fn test_context_lifecycle() {
    let mut ctx = Context::<OpenFheEngine>::new(DEPTH, MODULUS).unwrap();
    assert!(!ctx.is_released());
    ctx.release();
    ctx.release();
    assert!(ctx.generate_keypair().unwrap_err().is_invalid_handle());
}

#[test]
fn test_encrypt_decrypt() {
    let ctx = Context::<OpenFheEngine>::new(DEPTH, MODULUS).unwrap();
    let kp = ctx.generate_keypair().unwrap();

    let ct = ctx.encrypt(&kp.public, MSG).unwrap();
    assert_eq!(ctx.decrypt(&kp.secret, &ct).unwrap(), MSG);
}

#[test]
fn test_eval_add() {
    let ctx = Context::<OpenFheEngine>::new(DEPTH, MODULUS).unwrap();
    let kp = ctx.generate_keypair().unwrap();

    let mut ct1 = ctx.encrypt(&kp.public, 10).unwrap();
    let ct2 = ctx.encrypt(&kp.public, 32).unwrap();
    ctx.eval_add(&mut ct1, &ct2).unwrap();

    assert_eq!(ctx.decrypt(&kp.secret, &ct1).unwrap(), 42);
    assert_eq!(ctx.decrypt(&kp.secret, &ct2).unwrap(), 32);
}

#[test]
fn test_keys_and_ciphertext_serialize() {
    let ctx = Context::<OpenFheEngine>::new(DEPTH, MODULUS).unwrap();
    let kp = ctx.generate_keypair().unwrap();
    let ct = ctx.encrypt(&kp.public, 7).unwrap();

    let pk_bytes = kp.public.serialize().unwrap();
    let sk_bytes = kp.secret.serialize().unwrap();
    let ct_bytes = ct.serialize().unwrap();
    assert!(!pk_bytes.is_empty());
    assert!(!sk_bytes.is_empty());

    let pk = ctx.deserialize_public_key(&pk_bytes).unwrap();
    let sk = ctx.deserialize_secret_key(&sk_bytes).unwrap();
    let ct = ctx.deserialize_ciphertext(&ct_bytes).unwrap();

    assert_eq!(ctx.decrypt(&sk, &ct).unwrap(), 7);
    let fresh = ctx.encrypt(&pk, 8).unwrap();
    assert_eq!(ctx.decrypt(&sk, &fresh).unwrap(), 8);
}

#[test]
fn test_roundtrip_into_fresh_context() {
    let (pk_bytes, sk_bytes, ct_bytes) = {
        let ctx = Context::<OpenFheEngine>::new(DEPTH, MODULUS).unwrap();
        let kp = ctx.generate_keypair().unwrap();
        let ct = ctx.encrypt(&kp.public, 7).unwrap();
        (
            kp.public.serialize().unwrap(),
            kp.secret.serialize().unwrap(),
            ct.serialize().unwrap(),
        )
    };

    let other = Context::<OpenFheEngine>::new(DEPTH, MODULUS).unwrap();
    let pk = other.deserialize_public_key(&pk_bytes).unwrap();
    let sk = other.deserialize_secret_key(&sk_bytes).unwrap();
    let ct = other.deserialize_ciphertext(&ct_bytes).unwrap();

    assert_eq!(other.decrypt(&sk, &ct).unwrap(), 7);
    let mut sum = other.encrypt(&pk, 35).unwrap();
    other.eval_add(&mut sum, &ct).unwrap();
    assert_eq!(other.decrypt(&sk, &sum).unwrap(), 42);
}
