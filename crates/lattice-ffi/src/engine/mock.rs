//! Mock engine for testing
//!
//! NOT SECURE - the "public key" is the secret key and ciphertexts are a
//! single additive mask `(a, b = m + a*s mod t)`. Enables fast iteration
//! without FFI overhead, and counts every native call and every live object
//! so tests can observe the lifecycle from the engine's side.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::{rngs::OsRng, Rng};
use zeroize::Zeroizing;

use super::Engine;
use crate::params::ContextParams;

/// Largest depth the mock accepts
pub const MOCK_MAX_DEPTH: u32 = 32;

/// Largest plaintext modulus the mock accepts (60-bit, like the native word size)
pub const MOCK_MAX_MODULUS: u64 = 1 << 60;

const MAGIC: u8 = 0xF7;
const TAG_PUBLIC_KEY: u8 = 1;
const TAG_SECRET_KEY: u8 = 2;
const TAG_CIPHERTEXT: u8 = 3;

/// A native call the mock can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFault {
    ContextCreation,
    PublicKeyGeneration,
    SecretKeyGeneration,
    Encryption,
    Decryption,
    Evaluation,
    Serialization,
}

/// Counters shared by an engine and every object it created
#[derive(Debug, Default)]
pub struct MockStats {
    native_calls: AtomicUsize,
    created: AtomicUsize,
    destroyed: AtomicUsize,
}

impl MockStats {
    /// Number of engine entry points invoked
    pub fn native_calls(&self) -> usize {
        self.native_calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Objects created and not yet destroyed
    pub fn live(&self) -> usize {
        self.created() - self.destroyed()
    }
}

/// Registers a native object with the stats for as long as it lives
#[derive(Debug)]
struct Tracked(Arc<MockStats>);

impl Tracked {
    fn new(stats: &Arc<MockStats>) -> Self {
        stats.created.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(stats))
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.0.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct MockContext {
    params: ContextParams,
    _tracked: Tracked,
}

#[derive(Debug)]
pub struct MockPublicKey {
    modulus: u64,
    key: u64,
    _tracked: Tracked,
}

pub struct MockSecretKey {
    modulus: u64,
    key: Zeroizing<u64>,
    _tracked: Tracked,
}

#[derive(Debug)]
pub struct MockCiphertext {
    modulus: u64,
    a: u64,
    b: u64,
    _tracked: Tracked,
}

#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    stats: Arc<MockStats>,
    faults: Vec<MockFault>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make one native call report failure from now on
    pub fn with_fault(mut self, fault: MockFault) -> Self {
        self.faults.push(fault);
        self
    }

    pub fn stats(&self) -> Arc<MockStats> {
        Arc::clone(&self.stats)
    }

    fn enter(&self, fault: MockFault) -> bool {
        self.stats.native_calls.fetch_add(1, Ordering::SeqCst);
        !self.faults.contains(&fault)
    }

    fn track(&self) -> Tracked {
        Tracked::new(&self.stats)
    }
}

fn mul_mod(x: u64, y: u64, m: u64) -> u64 {
    ((x as u128 * y as u128) % m as u128) as u64
}

fn add_mod(x: u64, y: u64, m: u64) -> u64 {
    ((x as u128 + y as u128) % m as u128) as u64
}

fn encode(tag: u8, modulus: u64, fields: &[u64]) -> Zeroizing<Vec<u8>> {
    let mut out = Zeroizing::new(Vec::with_capacity(2 + 8 * (1 + fields.len())));
    out.push(MAGIC);
    out.push(tag);
    out.extend_from_slice(&modulus.to_le_bytes());
    for field in fields {
        out.extend_from_slice(&field.to_le_bytes());
    }
    out
}

/// Parse `N` fields after the header; every value must be reduced mod the context modulus.
fn decode<const N: usize>(tag: u8, ctx: &MockContext, data: &[u8]) -> Option<[u64; N]> {
    if data.len() != 2 + 8 * (1 + N) || data[0] != MAGIC || data[1] != tag {
        return None;
    }

    let mut words = data[2..]
        .chunks_exact(8)
        .map(|chunk| <[u8; 8]>::try_from(chunk).ok().map(u64::from_le_bytes));

    let modulus = words.next()??;
    if modulus != ctx.params.plaintext_modulus {
        return None;
    }

    let mut fields = [0u64; N];
    for field in fields.iter_mut() {
        let value = words.next()??;
        if value >= modulus {
            return None;
        }
        *field = value;
    }
    Some(fields)
}

impl Engine for MockEngine {
    type Context = MockContext;
    type PublicKey = MockPublicKey;
    type SecretKey = MockSecretKey;
    type Ciphertext = MockCiphertext;
    type Buffer = Zeroizing<Vec<u8>>;

    fn name(&self) -> &'static str {
        "Mock (TESTING ONLY)"
    }

    fn create_context(&self, params: &ContextParams) -> Option<MockContext> {
        if !self.enter(MockFault::ContextCreation) {
            return None;
        }
        if params.depth == 0
            || params.depth > MOCK_MAX_DEPTH
            || params.plaintext_modulus < 2
            || params.plaintext_modulus > MOCK_MAX_MODULUS
        {
            return None;
        }
        Some(MockContext {
            params: *params,
            _tracked: self.track(),
        })
    }

    fn keygen(&self, ctx: &MockContext) -> (Option<MockPublicKey>, Option<MockSecretKey>) {
        self.stats.native_calls.fetch_add(1, Ordering::SeqCst);
        let modulus = ctx.params.plaintext_modulus;
        let key = OsRng.gen_range(1..modulus);

        let pk = (!self.faults.contains(&MockFault::PublicKeyGeneration)).then(|| MockPublicKey {
            modulus,
            key,
            _tracked: self.track(),
        });
        let sk = (!self.faults.contains(&MockFault::SecretKeyGeneration)).then(|| MockSecretKey {
            modulus,
            key: Zeroizing::new(key),
            _tracked: self.track(),
        });
        (pk, sk)
    }

    fn encrypt(&self, ctx: &MockContext, pk: &MockPublicKey, value: u64) -> Option<MockCiphertext> {
        if !self.enter(MockFault::Encryption) {
            return None;
        }
        let t = ctx.params.plaintext_modulus;
        let a = OsRng.gen_range(0..t);
        let b = add_mod(value % t, mul_mod(a, pk.key % t, t), t);
        Some(MockCiphertext {
            modulus: t,
            a,
            b,
            _tracked: self.track(),
        })
    }

    fn decrypt(&self, ctx: &MockContext, sk: &MockSecretKey, ct: &MockCiphertext) -> Option<u64> {
        if !self.enter(MockFault::Decryption) {
            return None;
        }
        let t = ctx.params.plaintext_modulus;
        let mask = mul_mod(ct.a % t, *sk.key % t, t);
        Some(add_mod(ct.b % t, t - mask, t))
    }

    fn eval_add_in_place(
        &self,
        ctx: &MockContext,
        acc: &mut MockCiphertext,
        other: &MockCiphertext,
    ) -> bool {
        if !self.enter(MockFault::Evaluation) {
            return false;
        }
        let t = ctx.params.plaintext_modulus;
        acc.a = add_mod(acc.a, other.a, t);
        acc.b = add_mod(acc.b, other.b, t);
        acc.modulus = t;
        true
    }

    fn serialize_public_key(&self, pk: &MockPublicKey) -> Option<Self::Buffer> {
        self.enter(MockFault::Serialization)
            .then(|| encode(TAG_PUBLIC_KEY, pk.modulus, &[pk.key]))
    }

    fn serialize_secret_key(&self, sk: &MockSecretKey) -> Option<Self::Buffer> {
        self.enter(MockFault::Serialization)
            .then(|| encode(TAG_SECRET_KEY, sk.modulus, &[*sk.key]))
    }

    fn serialize_ciphertext(&self, ct: &MockCiphertext) -> Option<Self::Buffer> {
        self.enter(MockFault::Serialization)
            .then(|| encode(TAG_CIPHERTEXT, ct.modulus, &[ct.a, ct.b]))
    }

    fn deserialize_public_key(&self, ctx: &MockContext, data: &[u8]) -> Option<MockPublicKey> {
        self.stats.native_calls.fetch_add(1, Ordering::SeqCst);
        let [key] = decode::<1>(TAG_PUBLIC_KEY, ctx, data)?;
        Some(MockPublicKey {
            modulus: ctx.params.plaintext_modulus,
            key,
            _tracked: self.track(),
        })
    }

    fn deserialize_secret_key(&self, ctx: &MockContext, data: &[u8]) -> Option<MockSecretKey> {
        self.stats.native_calls.fetch_add(1, Ordering::SeqCst);
        let [key] = decode::<1>(TAG_SECRET_KEY, ctx, data)?;
        Some(MockSecretKey {
            modulus: ctx.params.plaintext_modulus,
            key: Zeroizing::new(key),
            _tracked: self.track(),
        })
    }

    fn deserialize_ciphertext(&self, ctx: &MockContext, data: &[u8]) -> Option<MockCiphertext> {
        self.stats.native_calls.fetch_add(1, Ordering::SeqCst);
        let [a, b] = decode::<2>(TAG_CIPHERTEXT, ctx, data)?;
        Some(MockCiphertext {
            modulus: ctx.params.plaintext_modulus,
            a,
            b,
            _tracked: self.track(),
        })
    }
}
