use mastery_core::model::{MasteryRank, REWARDS, Reward};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Picks a reward uniformly from the catalogue.
pub fn pick_reward<R: Rng + ?Sized>(rng: &mut R) -> Reward {
    // The catalogue is a non-empty const array.
    *REWARDS.choose(rng).unwrap_or(&REWARDS[0])
}

/// A reward when moving from `before` to a strictly higher `after` tier.
#[must_use]
pub fn unlock_reward(before: MasteryRank, after: MasteryRank) -> Option<Reward> {
    (after > before).then(|| pick_reward(&mut rand::rng()))
}
