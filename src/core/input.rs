//! Input system for handling keyboard and mouse input
//!
//! This module provides an InputSystem that translates user input into orbit
//! camera movements. Input is polled: the renderer asks for the current state
//! once per frame instead of reacting to individual events.
//!
//! Controls:
//! - Hold down '1' to view the scene in wireframe mode.
//! - Hold the left mouse button and move the mouse to rotate.
//! - Hold the right mouse button and move the mouse to zoom in and out.

use std::collections::HashSet;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use crate::component::OrbitCamera;

/// Configuration for InputSystem behavior
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Orbit sensitivity in degrees per pixel
    pub orbit_sensitivity: f32,
    /// Zoom sensitivity in world units per pixel
    pub zoom_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        // Each pixel of mouse travel is a quarter of a degree of orbit
        // or 0.05 world units of zoom.
        Self {
            orbit_sensitivity: 0.25,
            zoom_sensitivity: 0.05,
        }
    }
}

/// InputSystem manages keyboard and mouse input state
/// and translates them into orbit camera movements
pub struct InputSystem {
    // Keyboard state
    pressed_keys: HashSet<KeyCode>,

    // Mouse state
    last_mouse_pos: (f64, f64),
    mouse_buttons: HashSet<MouseButton>,
    mouse_delta: (f32, f32),

    // Sensitivity configuration
    orbit_sensitivity: f32, // Degrees per pixel
    zoom_sensitivity: f32,  // Units per pixel

    // First mouse movement flag
    first_mouse: bool,
}

impl InputSystem {
    /// Create a new InputSystem with default configuration
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    /// Create InputSystem with custom configuration
    pub fn with_config(config: InputConfig) -> Self {
        Self {
            pressed_keys: HashSet::new(),
            last_mouse_pos: (0.0, 0.0),
            mouse_buttons: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            orbit_sensitivity: config.orbit_sensitivity,
            zoom_sensitivity: config.zoom_sensitivity,
            first_mouse: true,
        }
    }

    /// Process keyboard input event
    pub fn on_keyboard_input(&mut self, keycode: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.pressed_keys.insert(keycode);
            }
            ElementState::Released => {
                self.pressed_keys.remove(&keycode);
            }
        }
    }

    /// Process mouse button event
    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.mouse_buttons.insert(button);
            }
            ElementState::Released => {
                self.mouse_buttons.remove(&button);
            }
        }
    }

    /// Process mouse movement event
    pub fn on_mouse_move(&mut self, position: (f64, f64)) {
        if self.first_mouse {
            self.last_mouse_pos = position;
            self.first_mouse = false;
            return;
        }

        let dx = (position.0 - self.last_mouse_pos.0) as f32;
        let dy = (position.1 - self.last_mouse_pos.1) as f32;

        // Accumulate so that several motion events within one frame are not lost
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
        self.last_mouse_pos = position;
    }

    /// Update camera based on current input state.
    /// Called every frame; consumes the accumulated mouse delta.
    pub fn update_camera(&mut self, camera: &mut OrbitCamera) {
        let (dx, dy) = self.mouse_delta;

        if self.mouse_buttons.contains(&MouseButton::Left) {
            // Convert pixel movement to radians
            let d_theta = (dx * self.orbit_sensitivity).to_radians();
            let d_phi = (dy * self.orbit_sensitivity).to_radians();
            camera.orbit(d_theta, d_phi);
        } else if self.mouse_buttons.contains(&MouseButton::Right) {
            let dx = dx * self.zoom_sensitivity;
            let dy = dy * self.zoom_sensitivity;
            camera.zoom(dx - dy);
        }

        // Reset delta for next frame
        self.mouse_delta = (0.0, 0.0);
    }

    /// Wireframe is shown for as long as '1' is held down (polled each frame)
    pub fn wireframe_held(&self) -> bool {
        self.is_key_pressed(KeyCode::Digit1)
    }

    /// Reset mouse state (useful when window loses focus)
    pub fn reset_mouse(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.first_mouse = true;
    }

    /// Check if a specific key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Check if a specific mouse button is currently pressed
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(1.5 * PI, 0.2 * PI, 15.0)
    }

    #[test]
    fn test_key_state_tracking() {
        let mut input = InputSystem::new();
        assert!(!input.wireframe_held());

        input.on_keyboard_input(KeyCode::Digit1, ElementState::Pressed);
        assert!(input.wireframe_held());

        input.on_keyboard_input(KeyCode::Digit1, ElementState::Released);
        assert!(!input.wireframe_held());
    }

    #[test]
    fn test_left_drag_orbits_camera() {
        let mut input = InputSystem::new();
        let mut cam = camera();
        let theta0 = cam.theta();

        input.on_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.on_mouse_move((100.0, 100.0)); // first move only establishes the anchor
        input.on_mouse_move((140.0, 100.0)); // 40 pixels right
        input.update_camera(&mut cam);

        let expected = (40.0f32 * 0.25).to_radians();
        assert!((cam.theta() - theta0 - expected).abs() < 1e-5);
    }

    #[test]
    fn test_right_drag_zooms_camera() {
        let mut input = InputSystem::new();
        let mut cam = camera();
        let radius0 = cam.radius();

        input.on_mouse_button(MouseButton::Right, ElementState::Pressed);
        input.on_mouse_move((0.0, 0.0));
        input.on_mouse_move((0.0, 20.0)); // drag down: dy > 0 => zoom in
        input.update_camera(&mut cam);

        assert!((cam.radius() - (radius0 - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_delta_consumed_after_update() {
        let mut input = InputSystem::new();
        let mut cam = camera();

        input.on_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.on_mouse_move((0.0, 0.0));
        input.on_mouse_move((50.0, 0.0));
        input.update_camera(&mut cam);

        let theta = cam.theta();
        // No further movement: a second update must not rotate again
        input.update_camera(&mut cam);
        assert_eq!(cam.theta(), theta);
    }
}
