use karst_geom::Vec3;

use crate::{PhysicsBody, PhysicsError};

/// Ground plane the controller rests on.
const GROUND_HEIGHT: f32 = 0.0;

/// Keeps the look direction off the exact poles so the flattened forward
/// never degenerates to zero.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Whether the controlled body rests on the ground plane or is airborne.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GroundState {
    Standing,
    InAir,
}

/// One frame of already-debounced input from the collaborator layer:
/// movement intents plus the raw look delta in counts.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub look_dx: f32,
    pub look_dy: f32,
}

/// First-person look orientation: yaw around the vertical axis, pitch
/// clamped short of the poles, driven by per-frame pointer deltas.
#[derive(Clone, Debug)]
pub struct PlayerCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub sensitivity: f32,
    pub eye_height: f32,
}

impl PlayerCamera {
    pub fn new(sensitivity: f32, eye_height: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            sensitivity,
            eye_height,
        }
    }

    /// Consumes one frame's look delta.
    pub fn apply_look(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Unit view direction from yaw/pitch.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// View direction flattened to the horizontal plane and renormalized;
    /// the basis for movement forces.
    pub fn flat_forward(&self) -> Vec3 {
        self.forward().flat_normalized()
    }

    /// Eye point for the render camera, offset above the feet position.
    pub fn eye_position(&self, feet: Vec3) -> Vec3 {
        feet + Vec3::UP * self.eye_height
    }
}

/// Tunables for the controller, supplied by the configuration collaborator
/// and immutable afterwards.
#[derive(Copy, Clone, Debug)]
pub struct PlayerParams {
    pub mass: f32,
    pub spawn: Vec3,
    /// Gravity magnitude (positive; applied downward).
    pub gravity: f32,
    pub jump_scale: f32,
    /// Movement force per unit mass.
    pub move_force: f32,
    pub mouse_sensitivity: f32,
    pub eye_height: f32,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            mass: 90.0,
            spawn: Vec3::ZERO,
            gravity: 9.8,
            jump_scale: 5.0,
            move_force: 1.0,
            mouse_sensitivity: 0.003,
            eye_height: 1.8,
        }
    }
}

/// Composes a [`PhysicsBody`] with the ground-contact state machine and an
/// owned look camera. Per step: look update, intent forces, gravity while
/// airborne, integration, then the ground clamp.
pub struct PlayerController {
    body: PhysicsBody,
    state: GroundState,
    camera: PlayerCamera,
    gravity: f32,
    jump_scale: f32,
    move_force: f32,
}

impl PlayerController {
    pub fn new(params: PlayerParams) -> Result<Self, PhysicsError> {
        Ok(Self {
            body: PhysicsBody::new(params.mass, params.spawn)?,
            state: GroundState::Standing,
            camera: PlayerCamera::new(params.mouse_sensitivity, params.eye_height),
            gravity: params.gravity,
            jump_scale: params.jump_scale,
            move_force: params.move_force,
        })
    }

    #[inline]
    pub fn state(&self) -> GroundState {
        self.state
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.body.velocity
    }

    #[inline]
    pub fn camera(&self) -> &PlayerCamera {
        &self.camera
    }

    pub fn eye_position(&self) -> Vec3 {
        self.camera.eye_position(self.body.position)
    }

    pub fn look_target(&self) -> Vec3 {
        self.eye_position() + self.camera.forward()
    }

    /// Advances one simulation step from this frame's input.
    pub fn update(&mut self, input: &InputFrame, dt: f32) {
        self.camera.apply_look(input.look_dx, input.look_dy);

        let fwd = self.camera.flat_forward();
        let right = fwd.cross(Vec3::UP).normalized();
        // Intent forces scale with mass; velocity is unbounded by design
        // (no speed cap existed upstream).
        let scale = self.body.mass() * self.move_force;
        if input.forward {
            self.body.apply_force(fwd * scale);
        }
        if input.back {
            self.body.apply_force(-fwd * scale);
        }
        if input.right {
            self.body.apply_force(right * scale);
        }
        if input.left {
            self.body.apply_force(-right * scale);
        }

        // A jump only launches from the ground; airborne jump intents are
        // ignored entirely.
        if input.jump && self.state == GroundState::Standing {
            self.state = GroundState::InAir;
            let impulse = self.body.mass() * (2.0 * self.gravity).sqrt() * self.jump_scale;
            self.body.apply_force(Vec3::UP * impulse);
        }

        if self.state == GroundState::InAir {
            self.body.apply_force(Vec3::DOWN * self.body.mass() * self.gravity);
        }

        self.body.advance(dt);

        // Ground contact: clamp to the plane and kill any remaining
        // downward velocity so the body neither sinks nor bounces.
        if self.body.position.y <= GROUND_HEIGHT {
            self.state = GroundState::Standing;
            self.body.position.y = GROUND_HEIGHT;
            if self.body.velocity.y < 0.0 {
                self.body.velocity.y = 0.0;
            }
        }
    }
}
