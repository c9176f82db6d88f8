use std::collections::{BTreeMap, VecDeque};

use blockyard_world::{Hit, Texture};

use crate::config::AppConfig;

pub enum Event {
    // Time housekeeping
    Tick,

    // Input-derived intents
    ViewModeToggled,
    TextureSelected { texture: Texture },
    PlacementRequested { hit: Hit, alt: bool },
    SaveRequested,
    ResetRequested,

    // Hot reload
    ConfigReloaded { config: Box<AppConfig> },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Tick => "Tick",
            Event::ViewModeToggled => "ViewModeToggled",
            Event::TextureSelected { .. } => "TextureSelected",
            Event::PlacementRequested { .. } => "PlacementRequested",
            Event::SaveRequested => "SaveRequested",
            Event::ResetRequested => "ResetRequested",
            Event::ConfigReloaded { .. } => "ConfigReloaded",
        }
    }
}

pub struct EventEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: Event,
}

pub struct EventQueue {
    // map of tick -> FIFO queue of events
    by_tick: BTreeMap<u64, VecDeque<EventEnvelope>>,
    pub now: u64,
    next_id: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            by_tick: BTreeMap::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit_now(&mut self, kind: Event) -> u64 {
        let id = self.alloc_id();
        let env = EventEnvelope {
            id,
            tick: self.now,
            kind,
        };
        self.by_tick.entry(self.now).or_default().push_back(env);
        id
    }

    pub fn pop_ready(&mut self) -> Option<EventEnvelope> {
        self.by_tick
            .get_mut(&self.now)
            .and_then(|q| q.pop_front())
    }

    pub fn pending(&self) -> usize {
        self.by_tick.values().map(VecDeque::len).sum()
    }

    pub fn advance_tick(&mut self) {
        if self.by_tick.get(&self.now).is_some_and(VecDeque::is_empty) {
            self.by_tick.remove(&self.now);
        }
        self.now = self.now.wrapping_add(1);
    }
}
