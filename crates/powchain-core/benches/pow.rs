use criterion::{criterion_group, criterion_main, Criterion};
use powchain_core::{mine::run_parallel, Block, ProofOfWork};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn candidate() -> Block {
    let mut rng = StdRng::seed_from_u64(42);
    let data: Vec<u8> = (0..64).map(|_| rng.gen()).collect();
    let previous_hash: [u8; 32] = rng.gen();
    Block::new(data, previous_hash, 1_600_000_000)
}

fn bench_pow(c: &mut Criterion) {
    let block = candidate();

    c.bench_function("run_difficulty_16", |b| {
        let pow = ProofOfWork::new(&block, 16).unwrap();
        b.iter(|| pow.run().unwrap());
    });

    c.bench_function("run_parallel_difficulty_16", |b| {
        let pow = ProofOfWork::new(&block, 16).unwrap();
        b.iter(|| run_parallel(&pow).unwrap());
    });

    c.bench_function("validate", |b| {
        let pow = ProofOfWork::new(&block, 16).unwrap();
        let nonce = pow.run().unwrap().nonce;
        b.iter(|| pow.validate(nonce));
    });
}

criterion_group!(benches, bench_pow);
criterion_main!(benches);
