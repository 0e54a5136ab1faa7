use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use steem_core::{
    authority::Authority,
    authority_checker::MemoryAuthorityStore,
    config::ChainConfig,
    crypto::PrivateKey,
    name::AccountName,
    operations::{Operation, TransferOperation},
    transaction::Transaction,
};
use steem_time::TimePointSec;

fn transfer_tx(config: &ChainConfig) -> Transaction {
    let ops: Vec<Operation> = (0..10)
        .map(|i| {
            TransferOperation {
                from: AccountName::new("alice").unwrap(),
                to: AccountName::new("bob").unwrap(),
                amount: config.steem(1000 + i),
                memo: format!("payment {i}"),
            }
            .into()
        })
        .collect();
    Transaction::new(34294, 3707022213, TimePointSec::new(1459931369), ops).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let config = ChainConfig::mainnet();
    let key = PrivateKey::from_seed("alice_active").unwrap();
    let tx = transfer_tx(&config);

    c.bench_function("digest 10 transfers", |b| {
        b.iter(|| black_box(&tx).digest(&config.chain_id).unwrap())
    });

    c.bench_function("sign 10 transfers", |b| {
        b.iter(|| black_box(tx.clone()).sign(&key, &config).unwrap())
    });

    let public = key.public_key().unwrap();
    let mut store = MemoryAuthorityStore::new();
    store.insert_account(
        AccountName::new("alice").unwrap(),
        Authority::from_key(public.clone()),
        Authority::from_key(public.clone()),
        Authority::from_key(public),
    );
    let signed = tx.clone().sign(&key, &config).unwrap();
    c.bench_function("verify 10 transfers", |b| {
        b.iter(|| black_box(&signed).verify_authority(&store, &config).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
