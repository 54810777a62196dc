//! # Looking-Glass Client Benchmarks
//!
//! | Operation | Path |
//! |-----------|------|
//! | Key derivation | hex multihash + private key to `KeyPair` |
//! | Transaction signing | payload encode, BLAKE3, Ed25519 |
//! | Submission | `InMemoryLedger::accept_transaction` with verification |

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ledger_client::adapters::memory::DEFAULT_BLOCK_TIME;
use ledger_client::InMemoryLedger;
use shared_crypto::{derive_key_pair, KeyMaterial, KeyPair};
use shared_types::{
    AccountId, DomainId, Executable, Instruction, NewDomain, RegisterBox, SignedTransaction,
    TransactionPayload,
};

const ALICE_PUBLIC: &str =
    "ed01207233bfc89dcbd68c19fde6ce6158225298ec1131b6a130d1aeb454c1ab5183c0";
const ALICE_PRIVATE: &str = "9ac47abf59b356e0bd7dcbbbb4dec080e302156a48ca907e47cb6aea1d32719e7233bfc89dcbd68c19fde6ce6158225298ec1131b6a130d1aeb454c1ab5183c0";

fn alice() -> AccountId {
    "alice@wonderland".parse().unwrap()
}

fn register_payload(nonce: u32) -> TransactionPayload {
    let id: DomainId = "looking_glass".parse().unwrap();
    let register = Instruction::Register(RegisterBox::domain(NewDomain::new(id)));
    TransactionPayload::new(alice(), Executable::single(register), u64::MAX / 2, 100_000)
        .with_nonce(nonce)
}

fn bench_key_derivation(c: &mut Criterion) {
    let material = KeyMaterial::new(ALICE_PUBLIC, "ed25519", ALICE_PRIVATE);
    c.bench_function("derive_key_pair", |b| {
        b.iter(|| derive_key_pair(black_box(&material)).unwrap())
    });
}

fn bench_sign_transaction(c: &mut Criterion) {
    let key_pair = KeyPair::generate();
    let payload = register_payload(0);
    c.bench_function("sign_register_domain", |b| {
        b.iter(|| SignedTransaction::sign(black_box(payload.clone()), &key_pair).unwrap())
    });
}

fn bench_accept_transaction(c: &mut Criterion) {
    let key_pair = KeyPair::generate();
    let ledger =
        InMemoryLedger::with_account(DEFAULT_BLOCK_TIME, alice(), key_pair.public_key().clone());
    let mut nonce = 0u32;
    c.bench_function("accept_transaction", |b| {
        b.iter(|| {
            nonce = nonce.wrapping_add(1);
            let tx = SignedTransaction::sign(register_payload(nonce), &key_pair).unwrap();
            black_box(ledger.accept_transaction(tx.into()))
        })
    });
}

criterion_group!(
    benches,
    bench_key_derivation,
    bench_sign_transaction,
    bench_accept_transaction
);
criterion_main!(benches);
