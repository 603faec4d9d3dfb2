//! One controller slot: cached state, read accessors and device commands.

use log::error;

use crate::properties::{model_name, ControllerProperties};
use crate::radio::HidRadio;
use crate::types::{
    BalanceBoardData, ControllerData, GamepadData, KeyCode, KeyboardData, MouseData,
    MODIFIER_MASKS,
};

/// One hardware slot of the controller pool.
///
/// A `Controller` lives for the whole life of the pool; a physical device
/// comes and goes through connect/disconnect transitions driven by
/// [`crate::hub::ControllerHub::update`]. While disconnected it keeps its
/// last-known data and properties, readable but stale.
///
/// Commands take the radio as an argument because the slot does not own the
/// link; they are fire-and-forget, with failures logged and swallowed.
#[derive(Debug, Default)]
pub struct Controller {
    connected: bool,
    /// Own slot index, assigned on the first successful data fetch.
    index: Option<usize>,
    data: ControllerData,
    properties: ControllerProperties,
}

impl Controller {
    /// Check whether a device is currently connected on this slot.
    ///
    /// Reads the cached flag only; no I/O.
    #[inline]
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Own slot index, or `None` if no device was ever seen on this slot.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// Latest raw input snapshot.
    #[inline]
    #[must_use]
    pub const fn data(&self) -> &ControllerData {
        &self.data
    }

    /// Cached connection properties.
    ///
    /// Trustworthy only while [`Self::is_connected`] returns true; populated
    /// by the most recent connect.
    #[inline]
    #[must_use]
    pub const fn properties(&self) -> &ControllerProperties {
        &self.properties
    }

    /// Human-readable model name, `"Unknown"` for unmapped device types.
    #[must_use]
    pub fn model_name(&self) -> &'static str {
        model_name(self.properties.controller_type)
    }

    /// Check whether the slot last reported as a gamepad.
    #[inline]
    #[must_use]
    pub const fn is_gamepad(&self) -> bool {
        self.data.gamepad().is_some()
    }

    /// Check whether the slot last reported as a keyboard.
    #[inline]
    #[must_use]
    pub const fn is_keyboard(&self) -> bool {
        self.data.keyboard().is_some()
    }

    /// Check whether the slot last reported as a mouse.
    #[inline]
    #[must_use]
    pub const fn is_mouse(&self) -> bool {
        self.data.mouse().is_some()
    }

    /// Gamepad snapshot, if this slot carries a gamepad.
    #[inline]
    #[must_use]
    pub const fn gamepad(&self) -> Option<&GamepadData> {
        self.data.gamepad()
    }

    /// Keyboard snapshot, if this slot carries a keyboard.
    #[inline]
    #[must_use]
    pub const fn keyboard(&self) -> Option<&KeyboardData> {
        self.data.keyboard()
    }

    /// Mouse snapshot, if this slot carries a mouse.
    #[inline]
    #[must_use]
    pub const fn mouse(&self) -> Option<&MouseData> {
        self.data.mouse()
    }

    /// Balance-board snapshot, if this slot carries a balance board.
    #[inline]
    #[must_use]
    pub const fn balance_board(&self) -> Option<&BalanceBoardData> {
        self.data.balance_board()
    }

    /// Check whether a keyboard key is pressed.
    ///
    /// Modifier-range codes are resolved through the modifier bitfield, never
    /// through the pressed-keys array. For regular keys the array is scanned
    /// up to its first sentinel entry (the array is densely packed, so a
    /// sentinel marks end-of-data).
    ///
    /// Returns false when the slot does not carry a keyboard.
    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        if key.is_modifier() {
            return self.is_modifier_pressed(key);
        }

        let Some(keyboard) = self.data.keyboard() else {
            return false;
        };

        for &code in &keyboard.pressed_keys {
            // Sentinel marks end-of-data
            if code <= KeyCode::ERROR_UNDEFINED.0 {
                return false;
            }
            if code == key.0 {
                return true;
            }
        }
        false
    }

    /// Check whether a modifier key is pressed.
    ///
    /// `key` must lie in the modifier range (`LeftControl..=RightMeta`);
    /// anything else returns false.
    #[must_use]
    pub fn is_modifier_pressed(&self, key: KeyCode) -> bool {
        if !key.is_modifier() {
            return false;
        }

        let Some(keyboard) = self.data.keyboard() else {
            return false;
        };

        let mask = MODIFIER_MASKS[(key.0 - KeyCode::LEFT_CONTROL.0) as usize];
        // Each table entry has exactly one bit set, non-zero test suffices
        (keyboard.modifiers & mask) != 0
    }

    /// Ask the radio stack to drop this slot's link.
    ///
    /// The cached connected flag is not touched here; the disconnect is
    /// observed by a later [`crate::hub::ControllerHub::update`] like any
    /// other link loss.
    pub fn disconnect(&self, radio: &mut impl HidRadio) {
        let Some(idx) = self.connected_index() else {
            return;
        };

        radio.request_disconnect(idx);
    }

    /// Set the player-indicator LED bitmap.
    pub fn set_player_leds(&self, radio: &mut impl HidRadio, leds: u8) {
        let Some(idx) = self.connected_index() else {
            return;
        };

        if radio.set_player_leds(idx, leds).is_err() {
            error!("error setting player LEDs");
        }
    }

    /// Set the lightbar color on pads that have one.
    pub fn set_color_led(&self, radio: &mut impl HidRadio, red: u8, green: u8, blue: u8) {
        let Some(idx) = self.connected_index() else {
            return;
        };

        if radio.set_lightbar_color(idx, red, green, blue).is_err() {
            error!("error setting lightbar color");
        }
    }

    /// Start the rumble actuator.
    pub fn set_rumble(&self, radio: &mut impl HidRadio, force: u8, duration: u8) {
        let Some(idx) = self.connected_index() else {
            return;
        };

        if radio.set_rumble(idx, force, duration).is_err() {
            error!("error setting rumble");
        }
    }

    /// Precondition check shared by all commands: connected slots always
    /// have an index assigned.
    fn connected_index(&self) -> Option<usize> {
        if !self.connected {
            error!("controller not connected");
            return None;
        }
        self.index
    }

    pub(crate) fn raw_data_mut(&mut self) -> &mut ControllerData {
        &mut self.data
    }

    /// Record the slot's own index; idempotent across polls.
    pub(crate) fn assign_index(&mut self, idx: usize) {
        self.index = Some(idx);
    }

    /// Mark connected and cache the connection's properties.
    ///
    /// A properties fetch failure is logged but does not prevent the slot
    /// from being marked connected; the previous values stay in place.
    pub(crate) fn on_connected(&mut self, radio: &mut impl HidRadio) {
        self.connected = true;

        let Some(idx) = self.index else {
            error!("controller has no index assigned");
            return;
        };

        if radio.controller_properties(idx, &mut self.properties).is_err() {
            error!("failed to get controller properties");
        }
    }

    /// Mark disconnected; data and properties stay readable as last-known.
    pub(crate) fn on_disconnected(&mut self) {
        self.connected = false;
    }
}
