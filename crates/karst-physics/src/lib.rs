//! Force integration and the first-person controller.
#![forbid(unsafe_code)]

use karst_geom::Vec3;

mod player;

pub use player::{GroundState, InputFrame, PlayerCamera, PlayerController, PlayerParams};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    /// Mass must be a finite positive number; anything else would divide
    /// forces by zero or poison the integration with non-finite values.
    InvalidMass(f32),
}

impl std::fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhysicsError::InvalidMass(m) => write!(f, "invalid body mass: {}", m),
        }
    }
}

impl std::error::Error for PhysicsError {}

/// Point-mass integrator. Forces accumulate into a per-step acceleration
/// that [`PhysicsBody::advance`] consumes and resets, so acceleration only
/// ever reflects forces applied since the previous step. Construction
/// rejects invalid mass, which keeps `apply_force` infallible.
#[derive(Clone, Debug)]
pub struct PhysicsBody {
    mass: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    acceleration: Vec3,
}

impl PhysicsBody {
    pub fn new(mass: f32, position: Vec3) -> Result<Self, PhysicsError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }
        Ok(Self {
            mass,
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
        })
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    /// Accumulates `force / mass`. Callers may apply any number of forces
    /// between steps, in any order; they sum.
    #[inline]
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force / self.mass;
    }

    /// Semi-implicit Euler step over the caller-supplied frame time. No dt
    /// clamping: a very large step can tunnel, which is inherited behavior.
    pub fn advance(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.acceleration = Vec3::ZERO;
    }
}
