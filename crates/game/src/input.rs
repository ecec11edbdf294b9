//! Player input handling.
//!
//! This module converts sampled key state into the control input the
//! physics system consumes, and carries the action/binding tables a front
//! end would use to remap keys. The binding table is a plain lookup; no
//! event pump or device handling lives here.

use std::collections::HashMap;

use hopper_physics::ControlInput;
use serde::{Deserialize, Serialize};

/// Game actions a key can be bound to.
///
/// Movement and jumping are the actions the simulation consumes today;
/// the rest exist so bindings survive remapping round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    MoveLeft,
    MoveRight,
    MoveForward,
    MoveBackward,
    Jump,
    Pause,
    Confirm,
    Cancel,
    Inventory,
    Map,
}

/// Key names bound to each action.
///
/// Multiple keys may drive one action. Names are opaque strings owned by
/// whatever input layer feeds the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bindings {
    map: HashMap<Control, Vec<String>>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(Control::MoveLeft, vec!["ArrowLeft".to_string()]);
        map.insert(Control::MoveRight, vec!["ArrowRight".to_string()]);
        map.insert(Control::MoveForward, vec!["ArrowUp".to_string()]);
        map.insert(Control::MoveBackward, vec!["ArrowDown".to_string()]);
        map.insert(Control::Jump, vec!["Space".to_string()]);
        map.insert(Control::Pause, vec!["Escape".to_string()]);
        Self { map }
    }
}

impl Bindings {
    /// Keys currently bound to an action. Unbound actions yield an empty slice.
    pub fn keys_for(&self, control: Control) -> &[String] {
        self.map.get(&control).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Add a key binding for an action.
    pub fn bind(&mut self, control: Control, key: &str) {
        self.map.entry(control).or_default().push(key.to_string());
    }

    /// Remove every key bound to an action.
    pub fn unbind(&mut self, control: Control) {
        self.map.remove(&control);
    }
}

/// Sampled input for a single tick.
///
/// Held booleans reflect key state at the sample point; `jump_pressed` is
/// the edge signal (true only on the tick the jump key went down). Use
/// [`InputSampler`] to derive the edge from raw held state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputFrame {
    pub move_left: bool,
    pub move_right: bool,
    pub move_forward: bool,
    pub move_backward: bool,
    pub jump_held: bool,
    pub jump_pressed: bool,
}

impl InputFrame {
    /// Convert to a physics control input.
    pub fn to_control_input(&self) -> ControlInput {
        ControlInput {
            move_left: self.move_left,
            move_right: self.move_right,
            move_forward: self.move_forward,
            move_backward: self.move_backward,
            jump_held: self.jump_held,
            jump_pressed: self.jump_pressed,
        }
    }

    /// Check if any movement key is held.
    pub fn has_movement(&self) -> bool {
        self.move_left || self.move_right || self.move_forward || self.move_backward
    }
}

/// Derives the jump edge from raw held state across ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSampler {
    prev_jump_held: bool,
}

impl InputSampler {
    /// Create a sampler with no key history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build this tick's frame from raw held key state.
    pub fn sample(
        &mut self,
        move_left: bool,
        move_right: bool,
        move_forward: bool,
        move_backward: bool,
        jump_held: bool,
    ) -> InputFrame {
        let jump_pressed = jump_held && !self.prev_jump_held;
        self.prev_jump_held = jump_held;

        InputFrame {
            move_left,
            move_right,
            move_forward,
            move_backward,
            jump_held,
            jump_pressed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_control_input() {
        let frame = InputFrame {
            move_right: true,
            jump_held: true,
            jump_pressed: true,
            ..Default::default()
        };

        let input = frame.to_control_input();
        assert!(input.move_right);
        assert!(!input.move_left);
        assert!(input.jump_pressed);
    }

    #[test]
    fn test_sampler_edge_detection() {
        let mut sampler = InputSampler::new();

        // Key goes down: edge fires once.
        let frame = sampler.sample(false, false, false, false, true);
        assert!(frame.jump_pressed);

        // Still held: no edge.
        let frame = sampler.sample(false, false, false, false, true);
        assert!(frame.jump_held);
        assert!(!frame.jump_pressed);

        // Released then pressed again: edge fires again.
        sampler.sample(false, false, false, false, false);
        let frame = sampler.sample(false, false, false, false, true);
        assert!(frame.jump_pressed);
    }

    #[test]
    fn test_default_bindings() {
        let bindings = Bindings::default();
        assert_eq!(bindings.keys_for(Control::Jump), ["Space".to_string()]);
        assert!(bindings.keys_for(Control::Inventory).is_empty());
    }

    #[test]
    fn test_rebinding() {
        let mut bindings = Bindings::default();
        bindings.bind(Control::Jump, "KeyZ");
        assert_eq!(bindings.keys_for(Control::Jump).len(), 2);

        bindings.unbind(Control::Jump);
        assert!(bindings.keys_for(Control::Jump).is_empty());
    }
}
