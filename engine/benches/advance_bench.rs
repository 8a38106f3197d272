use criterion::{criterion_group, criterion_main, Criterion};
use snake_engine::{BotController, BotType, EngineSettings, SessionRng, SnakeEngine};

fn play_until_over(settings: &EngineSettings, bot_type: BotType, max_ticks: usize) -> u32 {
    let mut engine = SnakeEngine::new(settings.clone(), SessionRng::new(42))
        .expect("Bench settings should be valid");
    let mut bot_rng = SessionRng::new(7);

    for _ in 0..max_ticks {
        if engine.is_game_over() {
            break;
        }
        if let Some(direction) = BotController::calculate_move(bot_type, &engine.snapshot(), &mut bot_rng) {
            engine.set_direction(direction);
        }
        engine.advance();
    }
    engine.score()
}

fn bench_efficient_bot_20x15(c: &mut Criterion) {
    let settings = EngineSettings::with_field(20, 15);
    c.bench_function("efficient bot 20x15", |b| {
        b.iter(|| play_until_over(&settings, BotType::Efficient, 5_000))
    });
}

fn bench_random_bot_50x50(c: &mut Criterion) {
    let settings = EngineSettings::with_field(50, 50);
    c.bench_function("random bot 50x50", |b| {
        b.iter(|| play_until_over(&settings, BotType::Random, 5_000))
    });
}

fn bench_food_placement_crowded(c: &mut Criterion) {
    // A long snake on a small field forces the free-cell fallback often.
    let settings = EngineSettings::with_field(8, 8);
    c.bench_function("efficient bot 8x8", |b| {
        b.iter(|| play_until_over(&settings, BotType::Efficient, 2_000))
    });
}

criterion_group!(
    benches,
    bench_efficient_bot_20x15,
    bench_random_bot_50x50,
    bench_food_placement_crowded
);
criterion_main!(benches);
