use hecs::{Entity, World};
use std::collections::HashMap;

use crate::application::render::{BarGlyph, ElementOp};
use crate::domain::market_data::Timestamp;

pub mod components;
pub mod systems;

use components::{BarElement, ElementKey, Transition};

/// Scene of drawn bar elements, one entity per bar timestamp.
///
/// Elements are looked up by identity, never by draw order, so overlapping
/// transitions cannot evict the wrong element.
#[derive(Default)]
pub struct EcsWorld {
    pub world: World,
    index: HashMap<Timestamp, Entity>,
}

impl EcsWorld {
    /// Create a new empty ECS world.
    pub fn new() -> Self {
        Self { world: World::new(), index: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: Timestamp) -> bool {
        self.index.contains_key(&key)
    }

    /// Keys in chronological order.
    pub fn keys(&self) -> Vec<Timestamp> {
        let mut keys: Vec<Timestamp> = self.index.keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn oldest(&self) -> Option<Timestamp> {
        self.index.keys().min().copied()
    }

    pub fn glyph(&self, key: Timestamp) -> Option<BarGlyph> {
        let entity = *self.index.get(&key)?;
        self.world.get::<&BarElement>(entity).ok().map(|element| element.0)
    }

    /// Where the element is drawn at `now_ms`, mid-transition included.
    pub fn current_x(&self, key: Timestamp, now_ms: u64) -> Option<f64> {
        let entity = *self.index.get(&key)?;
        if let Ok(transition) = self.world.get::<&Transition>(entity) {
            return Some(transition.position_at(now_ms));
        }
        self.world.get::<&BarElement>(entity).ok().map(|element| element.0.x)
    }

    /// Move the element for `glyph.key` to its new geometry.
    ///
    /// An existing element starts from its current position and its previous
    /// transition is replaced. A new element starts at `enter_from_x`.
    pub fn transition_to(&mut self, glyph: BarGlyph, enter_from_x: f64, now_ms: u64, duration_ms: u64) -> ElementOp {
        if let Some(from_x) = self.current_x(glyph.key, now_ms) {
            let transition = Transition::new(from_x, glyph.x, now_ms, duration_ms);
            if let Some(&entity) = self.index.get(&glyph.key) {
                if self.world.insert(entity, (BarElement(glyph), transition)).is_ok() {
                    return ElementOp::Update { glyph, from_x, duration_ms };
                }
            }
            self.index.remove(&glyph.key);
        }

        let transition = Transition::new(enter_from_x, glyph.x, now_ms, duration_ms);
        let entity = self.world.spawn((ElementKey(glyph.key), BarElement(glyph), transition));
        self.index.insert(glyph.key, entity);
        ElementOp::Enter { glyph, from_x: enter_from_x, duration_ms }
    }

    pub fn remove(&mut self, key: Timestamp) -> Option<ElementOp> {
        let entity = self.index.remove(&key)?;
        let _ = self.world.despawn(entity);
        Some(ElementOp::Exit { key })
    }

    pub fn clear(&mut self) {
        self.world.clear();
        self.index.clear();
    }
}
