use anyhow::Context;
use cartpole::mdps::{Policy, UnforcedPolicy};
use cartpole::{CartPole, Continous, EpisodeEvent};
use cartpole_rl::config::TrainConfig;
use cartpole_rl::mdps::q_learning::QLearning;
use cartpole_rl::rewards::reward;
use std::{env, fs};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = match env::args().nth(1) {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading config from {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config from {path}"))?
        }
        None => TrainConfig::default(),
    };

    let mut solver = QLearning::new(&cfg)?;
    let (last_return, total_steps) = solver.exec();
    info!(
        episodes = cfg.episodes,
        total_steps, last_return, "training finished"
    );

    let records = solver.records();
    let visited = records
        .iter()
        .filter(|r| r.q.iter().any(|&q| q != 0.))
        .count();
    info!(
        records = records.len(),
        visited, "value table ready for export"
    );

    let baseline = rollout(&cfg, &UnforcedPolicy)?;
    let learned = rollout(&cfg, &solver.into_greedy_policy())?;
    info!(
        steps = baseline.len(),
        total_reward = episode_return(&baseline),
        "unforced baseline rollout"
    );
    info!(
        steps = learned.len(),
        total_reward = episode_return(&learned),
        "greedy rollout"
    );

    Ok(())
}

/// Replays a controller from the training start state until the step budget
/// or the termination bounds are hit.
fn rollout(cfg: &TrainConfig, policy: &dyn Policy) -> anyhow::Result<Vec<EpisodeEvent>> {
    let mut sim = CartPole::new(cfg.params)?;
    sim.reset(Some(cfg.initial_state));

    let mut events = Vec::new();
    for _ in 0..cfg.max_steps {
        let u = policy.policy(&sim.state());
        let s = sim.step(u);
        events.push(EpisodeEvent {
            s,
            r: reward(&cfg.weights, &s),
        });

        if s[0].abs() > cfg.track_limit || s[2].abs() > cfg.tilt_limit {
            break;
        }
    }

    Ok(events)
}

fn episode_return(events: &[EpisodeEvent]) -> Continous {
    events.iter().map(|e| e.r).sum()
}
