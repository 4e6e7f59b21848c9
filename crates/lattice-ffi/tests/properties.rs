//! Property-based tests for the evaluation and interchange contracts
//!
//! These tests validate SEMANTIC correctness, not byte-level equality.

use lattice_ffi::engine::MockEngine;
use lattice_ffi::Context;
use proptest::prelude::*;

proptest! {
    /// Property: decrypt(eval_add(E(a), E(b))) == (a + b) mod t
    #[test]
    fn prop_additive_homomorphism(t in 2u64..1_000_000, a in any::<u64>(), b in any::<u64>()) {
        let ctx = Context::<MockEngine>::new(2, t).unwrap();
        let kp = ctx.generate_keypair().unwrap();
        let (a, b) = (a % t, b % t);

        let mut acc = ctx.encrypt(&kp.public, a).unwrap();
        let other = ctx.encrypt(&kp.public, b).unwrap();
        ctx.eval_add(&mut acc, &other).unwrap();

        let expected = ((a as u128 + b as u128) % t as u128) as u64;
        prop_assert_eq!(ctx.decrypt(&kp.secret, &acc).unwrap(), expected);
    }

    /// Property: the addend still decrypts to its own plaintext
    #[test]
    fn prop_addend_unchanged(a in 0u64..65537, b in 0u64..65537) {
        let ctx = Context::<MockEngine>::new(2, 65537).unwrap();
        let kp = ctx.generate_keypair().unwrap();

        let mut acc = ctx.encrypt(&kp.public, a).unwrap();
        let other = ctx.encrypt(&kp.public, b).unwrap();
        ctx.eval_add(&mut acc, &other).unwrap();

        prop_assert_eq!(ctx.decrypt(&kp.secret, &other).unwrap(), b);
    }

    /// Property: decrypt(deserialize(serialize(E(m)))) == m
    #[test]
    fn prop_ciphertext_roundtrip(m in 0u64..65537) {
        let ctx = Context::<MockEngine>::new(2, 65537).unwrap();
        let kp = ctx.generate_keypair().unwrap();
        let ct = ctx.encrypt(&kp.public, m).unwrap();

        let restored = ctx.deserialize_ciphertext(&ct.serialize().unwrap()).unwrap();
        prop_assert_eq!(ctx.decrypt(&kp.secret, &restored).unwrap(), m);
    }

    /// Property: arbitrary bytes never crash deserialization
    #[test]
    fn prop_garbage_never_panics(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let ctx = Context::<MockEngine>::new(2, 65537).unwrap();
        let _ = ctx.deserialize_public_key(&data);
        let _ = ctx.deserialize_secret_key(&data);
        let _ = ctx.deserialize_ciphertext(&data);
    }
}
