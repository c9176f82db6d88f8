use blockyard_control::{
    FrameInput, InputMapper, Key, KeySet, KinematicBody, PhysicsBody, PlayerState, PlayerTuning,
    step,
};
use blockyard_geom::Euler;
use blockyard_world::{GridPos, Texture, ViewMode};

const DT: f32 = 1.0 / 60.0;

struct Rig {
    mapper: InputMapper,
    tuning: PlayerTuning,
    body: KinematicBody,
    state: PlayerState,
    view: ViewMode,
}

impl Rig {
    fn new() -> Self {
        let body = KinematicBody::default();
        let state = PlayerState::spawn(body.position());
        Self {
            mapper: InputMapper::default(),
            tuning: PlayerTuning::default(),
            body,
            state,
            view: ViewMode::FirstPerson,
        }
    }

    fn frame(&mut self, held: &[Key], occupied: &dyn Fn(GridPos) -> bool) {
        let held: KeySet = held.iter().copied().collect();
        let intents = self.mapper.map(&held, Texture::Dirt);
        if intents.toggle_view {
            self.view = self.view.toggled();
        }
        let input = FrameInput {
            movement: intents.movement,
            look: Euler::default(),
            view_mode: self.view,
            body_position: self.body.position(),
            body_velocity: self.body.velocity(),
        };
        self.state = step(&self.tuning, &self.state, &input, DT);
        self.body.set_velocity(self.state.velocity);
        self.body.integrate(DT, occupied);
    }
}

fn empty(_: GridPos) -> bool {
    false
}

#[test]
fn spawn_settles_on_ground() {
    let mut rig = Rig::new();
    for _ in 0..120 {
        rig.frame(&[], &empty);
    }
    assert!(rig.body.on_ground);
    assert!(rig.body.velocity().y.abs() < 0.05);
    assert!(rig.body.position().y.abs() < 0.01);
}

#[test]
fn holding_forward_walks_about_speed_per_second() {
    let mut rig = Rig::new();
    for _ in 0..120 {
        rig.frame(&[], &empty);
    }
    let start = rig.body.position();
    for _ in 0..60 {
        rig.frame(&[Key::W], &empty);
    }
    let travelled = start.z - rig.body.position().z;
    assert!(travelled > 3.5 && travelled <= 4.01, "travelled {travelled}");
    assert!(rig.state.moving);
}

#[test]
fn jump_leaves_ground_and_lands_again() {
    let mut rig = Rig::new();
    for _ in 0..120 {
        rig.frame(&[], &empty);
    }
    rig.frame(&[Key::Space], &empty);
    let mut peak = 0.0_f32;
    for _ in 0..30 {
        rig.frame(&[], &empty);
        peak = peak.max(rig.body.position().y);
    }
    assert!(peak > 0.5, "peak {peak}");
    for _ in 0..120 {
        rig.frame(&[], &empty);
    }
    assert!(rig.body.on_ground);
}

#[test]
fn cube_stops_walk() {
    let wall = |p: GridPos| p.2 == -3 && p.1 == 0;
    let mut rig = Rig::new();
    for _ in 0..120 {
        rig.frame(&[], &wall);
    }
    for _ in 0..180 {
        rig.frame(&[Key::W], &wall);
    }
    assert!((rig.body.position().z + 2.0).abs() < 0.01);
}

#[test]
fn view_toggle_moves_camera_behind() {
    let mut rig = Rig::new();
    for _ in 0..120 {
        rig.frame(&[], &empty);
    }
    rig.frame(&[Key::V], &empty);
    for _ in 0..120 {
        rig.frame(&[Key::V], &empty);
    }
    assert_eq!(rig.view, ViewMode::ThirdPerson);
    let cam = rig.state.camera_position;
    let body = rig.body.position();
    assert!((cam.z - body.z - 4.0).abs() < 0.05);
    assert!((cam.y - body.y - 2.0).abs() < 0.05);
}
