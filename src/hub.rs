//! Controller pool hub: polls the radio and dispatches connection edges.

use log::info;

use crate::controller::Controller;
use crate::radio::HidRadio;
use crate::types::MAX_CONTROLLERS;

/// Edge callback invoked with the slot that changed.
pub type ControllerCallback = fn(&Controller);

fn noop_callback(_: &Controller) {}

/// Fixed pool of controller slots over a radio stack.
///
/// One hub instance drives the whole pool: construct it in the application's
/// composition root, register callbacks once with [`Self::setup`], then call
/// [`Self::update`] from the main loop. Each update polls every slot,
/// compares the resulting connected-set against the previous poll and fires
/// the edge callbacks exactly once per transition, in increasing slot order.
///
/// The steady state (no connectivity change) costs one fetch per slot and
/// nothing else; no allocation anywhere.
///
/// # Example
///
/// ```
/// use radiopad::{ControllerHub, NullRadio};
///
/// let mut hub = ControllerHub::new(NullRadio);
/// hub.setup(
///     |controller| println!("connected: {}", controller.model_name()),
///     |controller| println!("disconnected: {}", controller.model_name()),
/// );
///
/// // Main loop
/// hub.update();
/// assert!(hub.controller(0).is_some_and(|c| !c.is_connected()));
/// ```
pub struct ControllerHub<R> {
    radio: R,
    controllers: [Controller; MAX_CONTROLLERS],
    /// Connected-set bitmask observed by the previous update.
    prev_connected: u8,
    on_connect: ControllerCallback,
    on_disconnect: ControllerCallback,
}

impl<R: HidRadio> ControllerHub<R> {
    /// Create a hub over the given radio stack, all slots disconnected.
    #[must_use]
    pub fn new(radio: R) -> Self {
        Self {
            radio,
            controllers: Default::default(),
            prev_connected: 0,
            on_connect: noop_callback,
            on_disconnect: noop_callback,
        }
    }

    /// Register the connection edge callbacks.
    ///
    /// Replaces any previous registration; the callbacks are process-wide
    /// for this hub, not additive.
    pub fn setup(&mut self, on_connect: ControllerCallback, on_disconnect: ControllerCallback) {
        self.on_connect = on_connect;
        self.on_disconnect = on_disconnect;
    }

    /// Run one polling cycle.
    ///
    /// Refreshes every slot's raw data, then fires `on_connect` /
    /// `on_disconnect` for each slot whose connectivity flipped since the
    /// previous cycle. A fetch failure simply means "not connected this
    /// cycle"; it is never escalated.
    ///
    /// On a connect the slot is fully connected (flag set, properties
    /// cached) before the callback runs. On a disconnect the callback runs
    /// first, while the slot still reports connected and carries its
    /// last-known data.
    pub fn update(&mut self) {
        let mut connected: u8 = 0;
        for (i, controller) in self.controllers.iter_mut().enumerate() {
            if self.radio.controller_data(i, controller.raw_data_mut()).is_err() {
                continue;
            }
            // Record the index in case this is the slot's first fetch
            controller.assign_index(i);
            connected |= 1 << i;
        }

        // No connectivity change, nothing to dispatch
        if connected == self.prev_connected {
            return;
        }

        info!("connected controllers: {connected:#04x} (bitmask)");

        for i in 0..MAX_CONTROLLERS {
            let bit = 1u8 << i;
            let now = connected & bit;
            let prev = self.prev_connected & bit;

            if now == prev {
                continue;
            }

            if now != 0 {
                info!("controller connected: {i}");
                self.controllers[i].on_connected(&mut self.radio);
                (self.on_connect)(&self.controllers[i]);
            } else {
                (self.on_disconnect)(&self.controllers[i]);
                self.controllers[i].on_disconnected();
                info!("controller disconnected: {i}");
            }
        }

        self.prev_connected = connected;
    }

    /// Get the controller on a slot, `None` if `idx` is out of range.
    #[inline]
    #[must_use]
    pub fn controller(&self, idx: usize) -> Option<&Controller> {
        self.controllers.get(idx)
    }

    /// All slots, connected or not, in index order.
    #[inline]
    #[must_use]
    pub fn controllers(&self) -> &[Controller; MAX_CONTROLLERS] {
        &self.controllers
    }

    /// Ask the radio stack to drop the link on a slot.
    pub fn disconnect(&mut self, idx: usize) {
        if let Some(controller) = self.controllers.get(idx) {
            controller.disconnect(&mut self.radio);
        }
    }

    /// Set the player-indicator LED bitmap on a slot.
    pub fn set_player_leds(&mut self, idx: usize, leds: u8) {
        if let Some(controller) = self.controllers.get(idx) {
            controller.set_player_leds(&mut self.radio, leds);
        }
    }

    /// Set the lightbar color on a slot.
    pub fn set_color_led(&mut self, idx: usize, red: u8, green: u8, blue: u8) {
        if let Some(controller) = self.controllers.get(idx) {
            controller.set_color_led(&mut self.radio, red, green, blue);
        }
    }

    /// Start the rumble actuator on a slot.
    pub fn set_rumble(&mut self, idx: usize, force: u8, duration: u8) {
        if let Some(controller) = self.controllers.get(idx) {
            controller.set_rumble(&mut self.radio, force, duration);
        }
    }

    /// Allow or refuse pairing of new devices.
    pub fn enable_new_connections(&mut self, enabled: bool) {
        self.radio.enable_new_connections(enabled);
    }

    /// Delete all pairing keys stored by the radio stack.
    pub fn forget_bluetooth_keys(&mut self) {
        self.radio.forget_stored_keys();
    }

    /// Enable or disable the software-emulated device.
    pub fn enable_virtual_device(&mut self, enabled: bool) {
        self.radio.set_virtual_device_enabled(enabled);
    }

    /// Local radio address, most significant byte first.
    #[must_use]
    pub fn local_address(&self) -> [u8; 6] {
        self.radio.local_address()
    }

    /// Version string of this library.
    #[must_use]
    pub fn version(&self) -> &'static str {
        crate::VERSION
    }

    /// Get a reference to the radio stack.
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Get a mutable reference to the radio stack.
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Decompose the hub, returning the radio stack.
    pub fn into_radio(self) -> R {
        self.radio
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::properties::{ControllerProperties, ControllerType};
    use crate::radio::RadioError;
    use crate::types::{Buttons, ControllerData, GamepadData};
    use std::sync::Mutex;
    use std::vec::Vec;

    /// Radio double with scripted per-slot connectivity.
    struct ScriptedRadio {
        link: [bool; MAX_CONTROLLERS],
        data: [ControllerData; MAX_CONTROLLERS],
        properties: [ControllerProperties; MAX_CONTROLLERS],
        data_fetches: usize,
        properties_fetches: usize,
        disconnect_requests: Vec<usize>,
    }

    impl ScriptedRadio {
        fn new() -> Self {
            Self {
                link: [false; MAX_CONTROLLERS],
                data: [ControllerData::default(); MAX_CONTROLLERS],
                properties: [ControllerProperties::default(); MAX_CONTROLLERS],
                data_fetches: 0,
                properties_fetches: 0,
                disconnect_requests: Vec::new(),
            }
        }
    }

    impl HidRadio for ScriptedRadio {
        fn controller_data(
            &mut self,
            idx: usize,
            data: &mut ControllerData,
        ) -> Result<(), RadioError> {
            self.data_fetches += 1;
            if !self.link[idx] {
                return Err(RadioError::NotConnected);
            }
            *data = self.data[idx];
            Ok(())
        }

        fn controller_properties(
            &mut self,
            idx: usize,
            properties: &mut ControllerProperties,
        ) -> Result<(), RadioError> {
            self.properties_fetches += 1;
            *properties = self.properties[idx];
            Ok(())
        }

        fn request_disconnect(&mut self, idx: usize) {
            self.disconnect_requests.push(idx);
        }

        fn set_player_leds(&mut self, _idx: usize, _leds: u8) -> Result<(), RadioError> {
            Ok(())
        }

        fn set_lightbar_color(
            &mut self,
            _idx: usize,
            _r: u8,
            _g: u8,
            _b: u8,
        ) -> Result<(), RadioError> {
            Ok(())
        }

        fn set_rumble(&mut self, _idx: usize, _force: u8, _duration: u8) -> Result<(), RadioError> {
            Ok(())
        }

        fn enable_new_connections(&mut self, _enabled: bool) {}

        fn forget_stored_keys(&mut self) {}

        fn set_virtual_device_enabled(&mut self, _enabled: bool) {}

        fn local_address(&self) -> [u8; 6] {
            [0xAA, 0xBB, 0xCC, 0x00, 0x11, 0x22]
        }
    }

    #[test]
    fn test_connect_edge_fires_once() {
        static EVENTS: Mutex<Vec<(char, usize)>> = Mutex::new(Vec::new());
        fn on_connect(c: &Controller) {
            EVENTS.lock().unwrap().push(('c', c.index().unwrap()));
        }
        fn on_disconnect(c: &Controller) {
            EVENTS.lock().unwrap().push(('d', c.index().unwrap()));
        }

        let mut radio = ScriptedRadio::new();
        radio.link[1] = true;
        let mut hub = ControllerHub::new(radio);
        hub.setup(on_connect, on_disconnect);

        hub.update();
        assert_eq!(*EVENTS.lock().unwrap(), [('c', 1)]);
        assert!(hub.controller(1).unwrap().is_connected());
        assert!(!hub.controller(0).unwrap().is_connected());

        // Steady state: same mask, zero callbacks
        hub.update();
        hub.update();
        assert_eq!(EVENTS.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_disconnect_callback_sees_connected_slot() {
        static SEEN: Mutex<Vec<(bool, &'static str)>> = Mutex::new(Vec::new());
        fn on_connect(_: &Controller) {}
        fn on_disconnect(c: &Controller) {
            SEEN.lock().unwrap().push((c.is_connected(), c.model_name()));
        }

        let mut radio = ScriptedRadio::new();
        radio.link[0] = true;
        radio.properties[0].controller_type = ControllerType::DualShock4;
        let mut hub = ControllerHub::new(radio);
        hub.setup(on_connect, on_disconnect);

        hub.update();
        hub.radio_mut().link[0] = false;
        hub.update();

        // The callback observed the slot before the flag was cleared
        assert_eq!(*SEEN.lock().unwrap(), [(true, "DualShock 4")]);
        assert!(!hub.controller(0).unwrap().is_connected());
    }

    #[test]
    fn test_connect_callback_sees_cached_properties() {
        static SEEN: Mutex<Vec<(bool, &'static str)>> = Mutex::new(Vec::new());
        fn on_connect(c: &Controller) {
            SEEN.lock().unwrap().push((c.is_connected(), c.model_name()));
        }
        fn on_disconnect(_: &Controller) {}

        let mut radio = ScriptedRadio::new();
        radio.link[2] = true;
        radio.properties[2].controller_type = ControllerType::DualSense;
        let mut hub = ControllerHub::new(radio);
        hub.setup(on_connect, on_disconnect);

        hub.update();
        assert_eq!(*SEEN.lock().unwrap(), [(true, "DualSense")]);
    }

    #[test]
    fn test_mixed_edges_dispatch_in_index_order() {
        static EVENTS: Mutex<Vec<(char, usize)>> = Mutex::new(Vec::new());
        fn on_connect(c: &Controller) {
            EVENTS.lock().unwrap().push(('c', c.index().unwrap()));
        }
        fn on_disconnect(c: &Controller) {
            EVENTS.lock().unwrap().push(('d', c.index().unwrap()));
        }

        let mut radio = ScriptedRadio::new();
        radio.link[0] = true;
        let mut hub = ControllerHub::new(radio);
        hub.setup(on_connect, on_disconnect);
        hub.update();

        // Slot 0 drops, slots 1 and 3 appear in the same poll
        {
            let radio = hub.radio_mut();
            radio.link[0] = false;
            radio.link[1] = true;
            radio.link[3] = true;
        }
        hub.update();

        assert_eq!(
            *EVENTS.lock().unwrap(),
            [('c', 0), ('d', 0), ('c', 1), ('c', 3)]
        );
    }

    #[test]
    fn test_properties_fetched_once_per_connection() {
        let mut radio = ScriptedRadio::new();
        radio.link[0] = true;
        let mut hub = ControllerHub::new(radio);

        hub.update();
        hub.update();
        hub.update();
        assert_eq!(hub.radio().properties_fetches, 1);

        // Reconnect cycle fetches again
        hub.radio_mut().link[0] = false;
        hub.update();
        hub.radio_mut().link[0] = true;
        hub.update();
        assert_eq!(hub.radio().properties_fetches, 2);
    }

    #[test]
    fn test_data_refreshed_every_poll_while_connected() {
        let mut radio = ScriptedRadio::new();
        radio.link[0] = true;
        let mut hub = ControllerHub::new(radio);
        hub.update();

        let mut pressed = GamepadData::neutral();
        pressed.buttons = Buttons::A;
        hub.radio_mut().data[0] = ControllerData::Gamepad(pressed);
        hub.update();

        let gamepad = hub.controller(0).unwrap().gamepad().unwrap();
        assert!(gamepad.buttons.contains(Buttons::A));
    }

    #[test]
    fn test_stale_data_readable_after_disconnect() {
        let mut radio = ScriptedRadio::new();
        radio.link[0] = true;
        let mut pressed = GamepadData::neutral();
        pressed.buttons = Buttons::X;
        radio.data[0] = ControllerData::Gamepad(pressed);
        let mut hub = ControllerHub::new(radio);
        hub.update();

        hub.radio_mut().link[0] = false;
        hub.update();

        // Last-known snapshot survives the disconnect
        let controller = hub.controller(0).unwrap();
        assert!(!controller.is_connected());
        assert!(controller.gamepad().unwrap().buttons.contains(Buttons::X));
    }

    #[test]
    fn test_update_with_default_callbacks_is_safe() {
        let mut radio = ScriptedRadio::new();
        radio.link[0] = true;
        radio.link[3] = true;
        let mut hub = ControllerHub::new(radio);

        hub.update();
        assert!(hub.controller(0).unwrap().is_connected());
        assert!(hub.controller(3).unwrap().is_connected());

        hub.radio_mut().link[3] = false;
        hub.update();
        assert!(!hub.controller(3).unwrap().is_connected());
    }

    #[test]
    fn test_fetch_failure_on_empty_slot_fires_nothing() {
        static EVENTS: Mutex<Vec<char>> = Mutex::new(Vec::new());
        fn on_connect(_: &Controller) {
            EVENTS.lock().unwrap().push('c');
        }
        fn on_disconnect(_: &Controller) {
            EVENTS.lock().unwrap().push('d');
        }

        let mut hub = ControllerHub::new(ScriptedRadio::new());
        hub.setup(on_connect, on_disconnect);

        hub.update();
        hub.update();
        assert!(EVENTS.lock().unwrap().is_empty());
        assert_eq!(hub.radio().data_fetches, 2 * MAX_CONTROLLERS);
    }

    #[test]
    fn test_setup_replaces_previous_registration() {
        static FIRST: Mutex<Vec<usize>> = Mutex::new(Vec::new());
        static SECOND: Mutex<Vec<usize>> = Mutex::new(Vec::new());
        fn first(c: &Controller) {
            FIRST.lock().unwrap().push(c.index().unwrap());
        }
        fn second(c: &Controller) {
            SECOND.lock().unwrap().push(c.index().unwrap());
        }
        fn ignore(_: &Controller) {}

        let mut radio = ScriptedRadio::new();
        radio.link[0] = true;
        let mut hub = ControllerHub::new(radio);
        hub.setup(first, ignore);
        hub.setup(second, ignore);

        hub.update();
        assert!(FIRST.lock().unwrap().is_empty());
        assert_eq!(*SECOND.lock().unwrap(), [0]);
    }

    #[test]
    fn test_hub_disconnect_passes_through_for_connected_slot() {
        let mut radio = ScriptedRadio::new();
        radio.link[2] = true;
        let mut hub = ControllerHub::new(radio);
        hub.update();

        hub.disconnect(2);
        hub.disconnect(1); // not connected, must not reach the radio
        hub.disconnect(99); // out of range, ignored

        assert_eq!(hub.radio().disconnect_requests, [2]);
        // Still flagged connected until a poll observes the link gone
        assert!(hub.controller(2).unwrap().is_connected());
    }

    #[test]
    fn test_version_and_local_address() {
        let hub = ControllerHub::new(ScriptedRadio::new());
        assert!(hub.version().starts_with("radiopad v"));
        assert_eq!(hub.local_address(), [0xAA, 0xBB, 0xCC, 0x00, 0x11, 0x22]);
    }
}
