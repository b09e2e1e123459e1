use criterion::{black_box, criterion_group, criterion_main, Criterion};
use golf_settle::handicap::engine::HandicapEngine;
use golf_settle::settlement::engine::SettlementEngine;
use golf_settle::simulation::stress_test::{generate_season, SeasonConfig};
use rust_decimal_macros::dec;

fn bench_settle_weekly_group(c: &mut Criterion) {
    let season = generate_season(&SeasonConfig {
        player_count: 8,
        game_count: 10,
        ..Default::default()
    });
    let engine = SettlementEngine::default();

    c.bench_function("settle_8_players_10_games", |b| {
        b.iter(|| engine.settle(black_box(&season.games), black_box(&season.players)))
    });
}

fn bench_settle_full_season(c: &mut Criterion) {
    let season = generate_season(&SeasonConfig {
        player_count: 40,
        game_count: 1_000,
        ..Default::default()
    });
    let engine = SettlementEngine::default();

    c.bench_function("settle_40_players_1000_games", |b| {
        b.iter(|| engine.settle(black_box(&season.games), black_box(&season.players)))
    });
}

fn bench_strokes_given(c: &mut Criterion) {
    c.bench_function("strokes_given", |b| {
        b.iter(|| {
            HandicapEngine::strokes_given(
                black_box(dec!(12.4)),
                black_box(dec!(5.8)),
                dec!(131),
                dec!(73.2),
                72,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_settle_weekly_group,
    bench_settle_full_season,
    bench_strokes_given
);
criterion_main!(benches);
