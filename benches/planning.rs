use bee_planner::grid_world::{BeeState, GridWorld, Heading};
use bee_planner::mdp::{Action, ActionNoise, PlannerConfig, PolicyIteration, ValueIteration};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn noisy_grid(size: i32) -> GridWorld {
    GridWorld::new(size, size, BeeState::new(0, 0, Heading::East), (size - 1, size - 1))
        .with_obstacle(size / 2, size / 2)
        .with_noise(Action::Forward, ActionNoise::new(0.1, 0.05, 0.2))
        .with_noise(Action::Reverse, ActionNoise::new(0.05, 0.05, 0.1))
}

fn bench_value_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_iteration");
    for size in [3, 5, 7] {
        let env = noisy_grid(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &env, |b, env| {
            b.iter(|| {
                let mut vi = ValueIteration::new(env, PlannerConfig::default()).unwrap();
                black_box(vi.plan().unwrap())
            })
        });
    }
    group.finish();
}

fn bench_policy_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_iteration");
    for size in [3, 5, 7] {
        let env = noisy_grid(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &env, |b, env| {
            b.iter(|| {
                let mut pi = PolicyIteration::new(env, PlannerConfig::default()).unwrap();
                black_box(pi.plan().unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_value_iteration, bench_policy_iteration);
criterion_main!(benches);
