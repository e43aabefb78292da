//! End-to-end batched RL loop example.
//!
//! Demonstrates: build a batch → step with actions → export observations
//! into one flat buffer → let finished episodes restart → raise the
//! curriculum → repeat.

use rookery_bench::{random_actions, reference_profile};
use rookery_core::{Action, OBSERVATION_LEN};
use rookery_curriculum::{CurriculumParameters, FISH_SPEED};
use rookery_engine::BatchedEnv;
use rookery_test_utils::GreedyPolicy;

const NUM_ENVS: usize = 8;

fn main() {
    println!("=== Rookery Batched Lockstep Example ===\n");

    let params = CurriculumParameters::new();
    let mut config = reference_profile(7);
    config.max_steps = 1500;
    let mut batch = BatchedEnv::new(config, NUM_ENVS, params.clone()).unwrap();
    let mut obs = vec![0.0f32; NUM_ENVS * OBSERVATION_LEN];

    // --- Phase 1: random actions, still fish ---
    println!("Phase 1: 2000 ticks of random actions");
    let script = random_actions(2000 * NUM_ENVS, 7);
    let mut total_reward = 0.0f32;
    for (tick, actions) in script.chunks_exact(NUM_ENVS).enumerate() {
        let results = batch.step_all(actions).unwrap();
        total_reward += results.iter().map(|r| r.reward).sum::<f32>();
        if tick % 500 == 0 {
            batch.observe_into(&mut obs).unwrap();
            let mean_distance: f32 = obs
                .chunks_exact(OBSERVATION_LEN)
                .map(|row| row[1])
                .sum::<f32>()
                / NUM_ENVS as f32;
            println!(
                "  tick {:>4}: total_reward={:>8.3}, mean_distance_to_baby={:>6.3}",
                tick, total_reward, mean_distance,
            );
        }
    }
    println!("  auto resets so far: {}", batch.auto_resets());

    // --- Phase 2: greedy policy, swimming fish ---
    params.set(FISH_SPEED, 1.0);
    batch.reset_all(&[100, 101, 102, 103, 104, 105, 106, 107]).unwrap();
    println!("\nPhase 2: greedy policy with fish_speed=1.0");
    let policy = GreedyPolicy;
    let mut finished = 0;
    for _ in 0..1500 {
        let actions: Vec<Action> = batch.envs().iter().map(|env| policy.act(env)).collect();
        let results = batch.step_all(&actions).unwrap();
        finished += results.iter().filter(|r| r.done).count();
    }
    println!("  episodes completed: {finished}");
    for (i, env) in batch.envs().iter().enumerate() {
        if let Some(m) = env.last_episode() {
            println!(
                "  env {i}: last episode {} steps={} reward={:.3} fed={}",
                m.episode,
                m.steps,
                m.cumulative_reward,
                m.feeds()
            );
        }
    }
    println!("Done.");
}
