use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kaboom_core::*;

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        let board = difficulty.board();
        let center = (board.rows / 2, board.cols / 2);
        let mut generator = RandomMineGenerator::new(0x5eed);
        group.bench_with_input(BenchmarkId::from_parameter(difficulty), &board, |b, board| {
            b.iter(|| generator.generate(black_box(board), center))
        });
    }
    group.finish();
}

fn bench_first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for difficulty in Difficulty::ALL {
        let config = GameConfig::from(difficulty);
        let center = (config.board.rows / 2, config.board.cols / 2);
        let mut engine = GameEngine::with_seed(config, 0x5eed).expect("preset config is valid");
        group.bench_function(BenchmarkId::from_parameter(difficulty), |b| {
            b.iter(|| {
                engine.restart();
                black_box(engine.reveal(center).expect("center is in bounds"))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generation, bench_first_reveal);
criterion_main!(benches);
