use raylib::prelude::*;

use karst_physics::InputFrame;

/// Samples raylib key and pointer state into one frame of debounced
/// intents. `captured` gates the look delta so an uncaptured cursor does
/// not steer the camera.
pub fn gather(rl: &RaylibHandle, captured: bool) -> InputFrame {
    let md = if captured {
        rl.get_mouse_delta()
    } else {
        Vector2::zero()
    };
    InputFrame {
        forward: rl.is_key_down(KeyboardKey::KEY_W),
        back: rl.is_key_down(KeyboardKey::KEY_S),
        left: rl.is_key_down(KeyboardKey::KEY_A),
        right: rl.is_key_down(KeyboardKey::KEY_D),
        jump: rl.is_key_down(KeyboardKey::KEY_SPACE),
        look_dx: md.x,
        look_dy: md.y,
    }
}
