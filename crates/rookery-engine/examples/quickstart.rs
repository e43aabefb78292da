//! Rookery quickstart: a curriculum-driven training loop in miniature.
//!
//! Demonstrates:
//!   1. Sharing one CurriculumParameters handle with an environment
//!   2. Stepping a PenguinEnv with a simple greedy policy
//!   3. Raising difficulty between episodes
//!   4. Reading per-episode metrics
//!
//! Run with:
//!   RUST_LOG=rookery_engine=debug cargo run --example quickstart

use rookery_curriculum::{CurriculumParameters, FEED_RADIUS, FISH_SPEED};
use rookery_engine::{EnvConfig, PenguinEnv};
use rookery_test_utils::GreedyPolicy;
use tracing_subscriber::EnvFilter;

// ─── Curriculum schedule ────────────────────────────────────────

/// (fish_speed, feed_radius) per lesson.
const LESSONS: [(f32, f32); 3] = [(0.0, 2.0), (0.5, 1.0), (1.0, 0.0)];
const EPISODES_PER_LESSON: u64 = 2;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Rookery Quickstart ===\n");

    let params = CurriculumParameters::new();
    let mut env = PenguinEnv::new(EnvConfig::with_seed(42), params.clone())
        .expect("default config is valid");
    let policy = GreedyPolicy;

    let mut seed = 42;
    for (lesson, &(fish_speed, feed_radius)) in LESSONS.iter().enumerate() {
        let version = params.set_batch([(FISH_SPEED, fish_speed), (FEED_RADIUS, feed_radius)]);
        println!("Lesson {lesson}: fish_speed={fish_speed}, feed_radius={feed_radius} (params v{version})");

        for _ in 0..EPISODES_PER_LESSON {
            env.reset(seed);
            seed += 1;
            loop {
                let action = policy.act(&env);
                let result = env.step(action).expect("episode is live");
                if result.is_terminal() {
                    break;
                }
            }
            if let Some(m) = env.last_episode() {
                println!(
                    "  episode {:>2}: steps={:>5} reward={:>7.3} eaten={} fed={} (proximity={}, contact={}) {}",
                    m.episode,
                    m.steps,
                    m.cumulative_reward,
                    m.fish_eaten,
                    m.feeds(),
                    m.proximity_feeds,
                    m.contact_feeds,
                    if m.done { "done" } else { "truncated" },
                );
            }
        }
    }
}
