//! Radio capability trait and error types.

use crate::properties::ControllerProperties;
use crate::types::ControllerData;

/// Error type for radio operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// No device is present on the requested slot.
    NotConnected,
    /// Transport-level I/O error.
    Io,
    /// The device does not support the requested command.
    Unsupported,
}

/// Synchronous, non-blocking capability surface of the radio/HID stack.
///
/// This trait abstracts whatever stack actually talks to the devices
/// (Bluetooth classic, BLE, a vendor dongle), allowing the pool logic to be
/// driven by a test double on the host. Every call must return promptly;
/// pairing and link management run on the stack's own execution context.
///
/// Slot indexes are in `0..MAX_CONTROLLERS`. A fetch failure means "nothing
/// usable on that slot this poll" and is never treated as fatal by callers.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait HidRadio {
    /// Fetch the latest input snapshot for a slot into `data`.
    ///
    /// On failure `data` must be left untouched.
    fn controller_data(&mut self, idx: usize, data: &mut ControllerData) -> Result<(), RadioError>;

    /// Fetch the descriptive properties of the device on a slot.
    fn controller_properties(
        &mut self,
        idx: usize,
        properties: &mut ControllerProperties,
    ) -> Result<(), RadioError>;

    /// Ask the stack to drop the link on a slot.
    ///
    /// Completion is observed through a later failing
    /// [`Self::controller_data`] call, not synchronously.
    fn request_disconnect(&mut self, idx: usize);

    /// Set the player-indicator LED bitmap on a slot.
    fn set_player_leds(&mut self, idx: usize, leds: u8) -> Result<(), RadioError>;

    /// Set the RGB lightbar color on a slot.
    fn set_lightbar_color(&mut self, idx: usize, r: u8, g: u8, b: u8) -> Result<(), RadioError>;

    /// Start the rumble actuator on a slot.
    fn set_rumble(&mut self, idx: usize, force: u8, duration: u8) -> Result<(), RadioError>;

    /// Allow or refuse pairing of new devices.
    fn enable_new_connections(&mut self, enabled: bool);

    /// Delete all stored pairing keys.
    fn forget_stored_keys(&mut self);

    /// Enable or disable the software-emulated device.
    fn set_virtual_device_enabled(&mut self, enabled: bool);

    /// Local radio address, most significant byte first.
    fn local_address(&self) -> [u8; 6];
}

/// Radio with no devices behind it.
///
/// Use this as a placeholder while bringing up a board, or to drive the
/// pool logic with every slot permanently empty.
pub struct NullRadio;

impl HidRadio for NullRadio {
    fn controller_data(
        &mut self,
        _idx: usize,
        _data: &mut ControllerData,
    ) -> Result<(), RadioError> {
        Err(RadioError::NotConnected)
    }

    fn controller_properties(
        &mut self,
        _idx: usize,
        _properties: &mut ControllerProperties,
    ) -> Result<(), RadioError> {
        Err(RadioError::NotConnected)
    }

    fn request_disconnect(&mut self, _idx: usize) {}

    fn set_player_leds(&mut self, _idx: usize, _leds: u8) -> Result<(), RadioError> {
        Err(RadioError::NotConnected)
    }

    fn set_lightbar_color(&mut self, _idx: usize, _r: u8, _g: u8, _b: u8) -> Result<(), RadioError> {
        Err(RadioError::NotConnected)
    }

    fn set_rumble(&mut self, _idx: usize, _force: u8, _duration: u8) -> Result<(), RadioError> {
        Err(RadioError::NotConnected)
    }

    fn enable_new_connections(&mut self, _enabled: bool) {}

    fn forget_stored_keys(&mut self) {}

    fn set_virtual_device_enabled(&mut self, _enabled: bool) {}

    fn local_address(&self) -> [u8; 6] {
        [0; 6]
    }
}
