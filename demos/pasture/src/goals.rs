//! Sheep goals.
//!
//! | Priority | Goal                   | Flags            |
//! |----------|------------------------|------------------|
//! | 1        | `PanicGoal`            | move             |
//! | 3        | `TemptGoal`            | move, look       |
//! | 5        | `EatGrassGoal`         | move, look, jump |
//! | 6        | `RandomStrollGoal`     | move             |
//! | 7        | `LookAtShepherdGoal`   | look             |
//! | 8        | `RandomLookAroundGoal` | look             |
//!
//! Target selector: `AlertGoal` (target) at priority 1.

use std::f64::consts::TAU;

use mob_core::MobRng;
use mob_goal::{Flag, FlagSet, Goal, reduced_tick_delay};

use crate::sheep::{Sheep, Vec2};

// ── Movement ──────────────────────────────────────────────────────────────────

/// Run away from the shepherd while frightened.
pub struct PanicGoal {
    speed: f64,
    rng:   MobRng,
}

impl PanicGoal {
    pub fn new(speed: f64, rng: MobRng) -> Self {
        Self { speed, rng }
    }
}

impl Goal<Sheep> for PanicGoal {
    fn flags(&self) -> FlagSet {
        Flag::Move.into()
    }

    fn can_use(&mut self, s: &Sheep) -> bool {
        s.scared_ticks > 0
    }

    fn can_continue_to_use(&mut self, s: &Sheep) -> bool {
        s.nav.is_some()
    }

    fn start(&mut self, s: &mut Sheep) {
        let away = (s.pos - s.shepherd).normalized();
        let jitter = Vec2::from_angle(self.rng.gen_range(0.0..TAU)) * 2.0;
        s.navigate_to(s.pos + away * 8.0 + jitter, self.speed);
    }

    fn stop(&mut self, s: &mut Sheep) {
        s.stop_navigation();
    }

    fn name(&self) -> &'static str {
        "panic"
    }
}

/// Follow the shepherd while they hold wheat, then lose interest for a
/// while.
pub struct TemptGoal {
    speed:     f64,
    range:     f64,
    calm_down: u32,
}

impl TemptGoal {
    pub fn new(speed: f64, range: f64) -> Self {
        Self { speed, range, calm_down: 0 }
    }
}

impl Goal<Sheep> for TemptGoal {
    fn flags(&self) -> FlagSet {
        Flag::Move | Flag::Look
    }

    fn can_use(&mut self, s: &Sheep) -> bool {
        if self.calm_down > 0 {
            self.calm_down -= 1;
            return false;
        }
        s.tempting && s.shepherd_distance() < self.range
    }

    fn can_continue_to_use(&mut self, s: &Sheep) -> bool {
        s.tempting && s.shepherd_distance() < self.range
    }

    fn tick(&mut self, s: &mut Sheep) {
        s.look_at = Some(s.shepherd);
        if s.shepherd_distance() < 2.5 {
            s.stop_navigation();
        } else {
            s.navigate_to(s.shepherd, self.speed);
        }
    }

    fn stop(&mut self, s: &mut Sheep) {
        self.calm_down = reduced_tick_delay(100);
        s.stop_navigation();
        s.look_at = None;
    }

    fn name(&self) -> &'static str {
        "tempt"
    }
}

/// Lower the head and graze.  Holds every body flag so nothing else moves
/// the sheep meanwhile.
pub struct EatGrassGoal {
    chance: u32,
    timer:  u32,
    rng:    MobRng,
}

impl EatGrassGoal {
    pub fn new(chance: u32, rng: MobRng) -> Self {
        Self { chance, timer: 0, rng }
    }
}

impl Goal<Sheep> for EatGrassGoal {
    fn flags(&self) -> FlagSet {
        Flag::Move | Flag::Look | Flag::Jump
    }

    fn can_use(&mut self, _s: &Sheep) -> bool {
        self.rng.one_in(self.chance)
    }

    fn can_continue_to_use(&mut self, _s: &Sheep) -> bool {
        self.timer > 0
    }

    fn start(&mut self, s: &mut Sheep) {
        self.timer = self.adjusted_tick_delay(40);
        s.stop_navigation();
    }

    fn tick(&mut self, s: &mut Sheep) {
        self.timer = self.timer.saturating_sub(1);
        if self.timer == self.adjusted_tick_delay(4) {
            s.grass_eaten += 1;
        }
    }

    fn stop(&mut self, _s: &mut Sheep) {
        self.timer = 0;
    }

    fn name(&self) -> &'static str {
        "eat_grass"
    }
}

/// Now and then walk to a random nearby spot.
pub struct RandomStrollGoal {
    speed:    f64,
    interval: u32,
    rng:      MobRng,
    wanted:   Option<Vec2>,
}

impl RandomStrollGoal {
    pub fn new(speed: f64, interval: u32, rng: MobRng) -> Self {
        Self { speed, interval, rng, wanted: None }
    }
}

impl Goal<Sheep> for RandomStrollGoal {
    fn flags(&self) -> FlagSet {
        Flag::Move.into()
    }

    fn can_use(&mut self, s: &Sheep) -> bool {
        if !self.rng.one_in(reduced_tick_delay(self.interval)) {
            return false;
        }
        let heading = Vec2::from_angle(self.rng.gen_range(0.0..TAU));
        self.wanted = Some(s.pos + heading * self.rng.gen_range(2.0..10.0));
        true
    }

    fn can_continue_to_use(&mut self, s: &Sheep) -> bool {
        s.nav.is_some()
    }

    fn start(&mut self, s: &mut Sheep) {
        if let Some(dest) = self.wanted.take() {
            s.navigate_to(dest, self.speed);
        }
    }

    fn stop(&mut self, s: &mut Sheep) {
        s.stop_navigation();
    }

    fn name(&self) -> &'static str {
        "random_stroll"
    }
}

// ── Looking ───────────────────────────────────────────────────────────────────

pub struct LookAtShepherdGoal {
    range:     f64,
    look_time: u32,
    rng:       MobRng,
}

impl LookAtShepherdGoal {
    pub fn new(range: f64, rng: MobRng) -> Self {
        Self { range, look_time: 0, rng }
    }
}

impl Goal<Sheep> for LookAtShepherdGoal {
    fn flags(&self) -> FlagSet {
        Flag::Look.into()
    }

    fn can_use(&mut self, s: &Sheep) -> bool {
        s.shepherd_distance() < self.range && self.rng.gen_bool(0.02)
    }

    fn can_continue_to_use(&mut self, s: &Sheep) -> bool {
        self.look_time > 0 && s.shepherd_distance() < self.range
    }

    fn start(&mut self, _s: &mut Sheep) {
        let ticks = 40 + self.rng.gen_range(0..40);
        self.look_time = self.adjusted_tick_delay(ticks);
    }

    fn requires_update_every_tick(&self) -> bool {
        true
    }

    fn tick(&mut self, s: &mut Sheep) {
        s.look_at = Some(s.shepherd);
        self.look_time = self.look_time.saturating_sub(1);
    }

    fn stop(&mut self, s: &mut Sheep) {
        s.look_at = None;
    }

    fn name(&self) -> &'static str {
        "look_at_shepherd"
    }
}

pub struct RandomLookAroundGoal {
    look_time: u32,
    direction: Vec2,
    rng:       MobRng,
}

impl RandomLookAroundGoal {
    pub fn new(rng: MobRng) -> Self {
        Self { look_time: 0, direction: Vec2::default(), rng }
    }
}

impl Goal<Sheep> for RandomLookAroundGoal {
    fn flags(&self) -> FlagSet {
        Flag::Look.into()
    }

    fn can_use(&mut self, _s: &Sheep) -> bool {
        self.rng.gen_bool(0.02)
    }

    fn can_continue_to_use(&mut self, _s: &Sheep) -> bool {
        self.look_time > 0
    }

    fn start(&mut self, _s: &mut Sheep) {
        self.direction = Vec2::from_angle(self.rng.gen_range(0.0..TAU));
        let ticks = 20 + self.rng.gen_range(0..20);
        self.look_time = self.adjusted_tick_delay(ticks);
    }

    fn requires_update_every_tick(&self) -> bool {
        true
    }

    fn tick(&mut self, s: &mut Sheep) {
        s.look_at = Some(s.pos + self.direction);
        self.look_time = self.look_time.saturating_sub(1);
    }

    fn stop(&mut self, s: &mut Sheep) {
        s.look_at = None;
    }

    fn name(&self) -> &'static str {
        "random_look_around"
    }
}

// ── Targeting ─────────────────────────────────────────────────────────────────

/// Keep track of the shepherd while frightened and close enough to see them.
pub struct AlertGoal {
    range: f64,
}

impl AlertGoal {
    pub fn new(range: f64) -> Self {
        Self { range }
    }
}

impl Goal<Sheep> for AlertGoal {
    fn flags(&self) -> FlagSet {
        Flag::Target.into()
    }

    fn can_use(&mut self, s: &Sheep) -> bool {
        s.scared_ticks > 0 && s.shepherd_distance() < self.range
    }

    fn start(&mut self, s: &mut Sheep) {
        s.alert = true;
    }

    fn stop(&mut self, s: &mut Sheep) {
        s.alert = false;
    }

    fn name(&self) -> &'static str {
        "alert"
    }
}
