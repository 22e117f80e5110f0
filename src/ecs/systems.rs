use hecs::World;

use super::components::{ElementKey, Transition};
use crate::domain::market_data::Timestamp;
use std::collections::HashSet;

/// Drop finished transitions so settled elements report their target x.
pub fn settle_transitions(world: &mut World, now_ms: u64) -> usize {
    let finished: Vec<hecs::Entity> = world
        .query::<&Transition>()
        .iter()
        .filter(|(_, transition)| transition.is_finished(now_ms))
        .map(|(entity, _)| entity)
        .collect();

    for entity in &finished {
        let _ = world.remove_one::<Transition>(*entity);
    }
    finished.len()
}

/// Keys of elements whose bar is no longer in `visible`, oldest first.
pub fn stale_keys(world: &World, visible: &HashSet<Timestamp>) -> Vec<Timestamp> {
    let mut stale: Vec<Timestamp> = world
        .query::<&ElementKey>()
        .iter()
        .map(|(_, key)| key.0)
        .filter(|key| !visible.contains(key))
        .collect();
    stale.sort();
    stale
}
