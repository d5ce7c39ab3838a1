//! Roll out a uniform random policy on a bounded random walk, observing it
//! through `RescaleObservation` so every observation arrives in [-1, 1].
//!
//! Logs at DEBUG so the library's construction events are visible.

use gym_rescale::{
    BoxSpace, DynSpace, Env, Info, ObservationSpace, Policy, RescaleObservation, Result, RngStream,
    SeedSequence, Step, UniformPolicy,
};
use ndarray::{ArrayD, IxDyn, Zip};
use rand::Rng;
use tracing::info;

/// A point drifting inside [-5, 5]^3, pushed by the action plus a little noise.
struct RandomWalk {
    pos: ArrayD<f32>,
    space: DynSpace<f32>,
    rng: RngStream,
    steps: u32,
}

impl RandomWalk {
    fn new(rng: RngStream) -> Result<Self> {
        Ok(Self {
            pos: ArrayD::zeros(IxDyn(&[3])),
            space: BoxSpace::from_bounds(-5.0f32, 5.0, &[3])?.into(),
            rng,
            steps: 0,
        })
    }
}

impl Env for RandomWalk {
    type Obs = ArrayD<f32>;
    type Act = ArrayD<f32>;

    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Obs, Info)> {
        if let Some(s) = seed {
            self.rng = gym_rescale::rng_from_seed(s);
        }
        self.pos.fill(0.0);
        self.steps = 0;
        Ok((self.pos.clone(), Info::new()))
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let rng = &mut self.rng;
        Zip::from(&mut self.pos).and(&action).for_each(|p, &a| {
            *p = (*p + a + rng.gen_range(-0.1f32..0.1)).clamp(-5.0, 5.0);
        });
        self.steps += 1;
        let reward = -self.pos.iter().map(|x| x.abs()).sum::<f32>();
        Ok(Step::new(self.pos.clone(), reward, false, self.steps >= 50, Info::new()))
    }
}

impl ObservationSpace for RandomWalk {
    type Scalar = f32;

    fn observation_space(&self) -> &DynSpace<f32> { &self.space }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let mut seeds = SeedSequence::new(2024);
    let mut env = RescaleObservation::new(RandomWalk::new(seeds.next_rng())?, -1.0f32, 1.0f32)?;
    let action_space = BoxSpace::from_bounds(-1.0f32, 1.0, &[3])?;
    let policy = UniformPolicy::new(vec![3], action_space)?;
    let mut policy_rng = seeds.next_rng();

    let (mut obs, _) = env.reset(Some(seeds.next_subseed()))?;
    let mut ret = 0.0f32;
    loop {
        let action = policy.actions(&obs, &mut policy_rng)?;
        let s = env.step(action)?;
        ret += s.reward;
        obs = s.observation;
        if s.terminated || s.truncated {
            break;
        }
    }
    info!(episode_return = ret, final_obs = %obs, "episode finished");
    env.close();
    Ok(())
}
