//! Sheep state and the little bit of kinematics the goals steer.

use mob_sim::{ControlPermissions, MobState};

/// Blocks moved per tick at speed modifier 1.0.
const BASE_SPEED: f64 = 0.1;

/// A navigation target counts as reached within this radius.
const ARRIVAL_RADIUS: f64 = 0.5;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).length()
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector, or zero for a zero vector.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len == 0.0 { Vec2::default() } else { self * (1.0 / len) }
    }

    pub fn from_angle(radians: f64) -> Vec2 {
        Vec2::new(radians.cos(), radians.sin())
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nav {
    pub dest:  Vec2,
    pub speed: f64,
}

// ── Sheep ─────────────────────────────────────────────────────────────────────

/// Everything a sheep's goals read and write.
#[derive(Debug, Default)]
pub struct Sheep {
    pub pos:          Vec2,
    /// Facing, in radians.
    pub yaw:          f64,
    pub nav:          Option<Nav>,
    pub look_at:      Option<Vec2>,

    /// Where the shepherd stood at the start of this tick.
    pub shepherd:     Vec2,
    /// The shepherd is holding wheat.
    pub tempting:     bool,

    /// Remaining ticks of fright.
    pub scared_ticks: u64,
    /// Set while a target goal is tracking the shepherd.
    pub alert:        bool,
    /// Tethered sheep cannot steer themselves.
    pub tethered:     bool,

    pub grass_eaten:  u32,
}

impl Sheep {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, ..Self::default() }
    }

    pub fn navigate_to(&mut self, dest: Vec2, speed: f64) {
        self.nav = Some(Nav { dest, speed });
    }

    pub fn stop_navigation(&mut self) {
        self.nav = None;
    }

    pub fn shepherd_distance(&self) -> f64 {
        self.pos.distance(self.shepherd)
    }

    /// Advance movement and facing by one tick.
    pub fn physics(&mut self) {
        self.scared_ticks = self.scared_ticks.saturating_sub(1);

        if let Some(nav) = self.nav {
            let to_dest = nav.dest - self.pos;
            let step = BASE_SPEED * nav.speed;
            if to_dest.length() <= step.max(ARRIVAL_RADIUS) {
                self.pos = nav.dest;
                self.nav = None;
            } else {
                self.pos = self.pos + to_dest.normalized() * step;
                self.yaw = to_dest.y.atan2(to_dest.x);
            }
        }

        if let Some(target) = self.look_at {
            let d = target - self.pos;
            if d.length() > 0.0 {
                self.yaw = d.y.atan2(d.x);
            }
        }
    }
}

impl MobState for Sheep {
    fn controls(&self) -> ControlPermissions {
        ControlPermissions { steer: !self.tethered, jump: true }
    }
}
