//! Raw per-slot input snapshots: gamepad, keyboard, mouse and balance board.
//!
//! These are the structures the radio stack writes into on every poll. They
//! carry lightly-parsed HID state only; interpretation (key lookups, model
//! names) lives in [`crate::controller`].

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Number of hardware slots exposed by the radio stack.
pub const MAX_CONTROLLERS: usize = 4;

/// Capacity of the densely-packed pressed-keys array in a keyboard report.
pub const MAX_PRESSED_KEYS: usize = 10;

/// Button state represented as a bitfield for efficiency.
///
/// Supports up to 16 buttons, with the common wireless-pad buttons
/// pre-defined. Implements bitwise operators for ergonomic manipulation.
///
/// # Example
///
/// ```
/// use radiopad::Buttons;
///
/// let buttons = Buttons::A | Buttons::B;
/// assert!(buttons.contains(Buttons::A));
/// assert!(!buttons.contains(Buttons::X));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const X: Self = Self(1 << 2);
    pub const Y: Self = Self(1 << 3);
    pub const SHOULDER_L: Self = Self(1 << 4); // L1
    pub const SHOULDER_R: Self = Self(1 << 5); // R1
    pub const TRIGGER_L: Self = Self(1 << 6); // L2 click
    pub const TRIGGER_R: Self = Self(1 << 7); // R2 click
    pub const THUMB_L: Self = Self(1 << 8); // Left stick press
    pub const THUMB_R: Self = Self(1 << 9); // Right stick press

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Directional-pad state as a 4-bit bitfield.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dpad(pub u8);

impl Dpad {
    pub const UP: Self = Self(1 << 0);
    pub const DOWN: Self = Self(1 << 1);
    pub const RIGHT: Self = Self(1 << 2);
    pub const LEFT: Self = Self(1 << 3);

    /// Centered, nothing pressed.
    pub const NONE: Self = Self(0);

    /// Check if the given direction(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, dir: Dpad) -> bool {
        (self.0 & dir.0) == dir.0
    }
}

/// Auxiliary buttons (system/home, select, start, capture).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MiscButtons(pub u8);

impl MiscButtons {
    pub const SYSTEM: Self = Self(1 << 0);
    pub const SELECT: Self = Self(1 << 1);
    pub const START: Self = Self(1 << 2);
    pub const CAPTURE: Self = Self(1 << 3);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: MiscButtons) -> bool {
        (self.0 & button.0) == button.0
    }
}

/// Analog stick with X/Y axes.
///
/// Range: [-512, 511].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogStick {
    pub x: i32,
    pub y: i32,
}

impl AnalogStick {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const NEUTRAL: Self = Self { x: 0, y: 0 };
}

/// One gamepad input snapshot.
///
/// - D-pad and 10 digital buttons (bitfields)
/// - 2 analog sticks (left/right, each X/Y in [-512, 511])
/// - 2 analog triggers (brake/throttle, 0-1023)
/// - gyro/accelerometer samples when the pad reports motion data
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadData {
    pub dpad: Dpad,
    pub buttons: Buttons,
    pub misc_buttons: MiscButtons,
    pub left_stick: AnalogStick,
    pub right_stick: AnalogStick,
    pub brake: i32,
    pub throttle: i32,
    pub gyro: [i32; 3],
    pub accel: [i32; 3],
}

impl GamepadData {
    /// All buttons released, sticks centered, triggers at 0.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            dpad: Dpad::NONE,
            buttons: Buttons::NONE,
            misc_buttons: MiscButtons(0),
            left_stick: AnalogStick::NEUTRAL,
            right_stick: AnalogStick::NEUTRAL,
            brake: 0,
            throttle: 0,
            gyro: [0; 3],
            accel: [0; 3],
        }
    }
}

/// HID keyboard usage code.
///
/// Values follow the HID usage table for the keyboard page. Codes in
/// `0xE0..=0xE7` are modifiers and are reported out of band in
/// [`KeyboardData::modifiers`] rather than in the pressed-keys array.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(pub u8);

impl KeyCode {
    /// Highest sentinel usage; array entries at or below this value mark
    /// end-of-data in a pressed-keys report.
    pub const ERROR_UNDEFINED: Self = Self(0x03);

    pub const A: Self = Self(0x04);
    pub const Z: Self = Self(0x1D);
    pub const ENTER: Self = Self(0x28);
    pub const ESCAPE: Self = Self(0x29);
    pub const SPACEBAR: Self = Self(0x2C);

    pub const LEFT_CONTROL: Self = Self(0xE0);
    pub const LEFT_SHIFT: Self = Self(0xE1);
    pub const LEFT_ALT: Self = Self(0xE2);
    pub const LEFT_META: Self = Self(0xE3);
    pub const RIGHT_CONTROL: Self = Self(0xE4);
    pub const RIGHT_SHIFT: Self = Self(0xE5);
    pub const RIGHT_ALT: Self = Self(0xE6);
    pub const RIGHT_META: Self = Self(0xE7);

    /// Check whether this code falls in the modifier range.
    #[inline]
    #[must_use]
    pub const fn is_modifier(self) -> bool {
        self.0 >= Self::LEFT_CONTROL.0 && self.0 <= Self::RIGHT_META.0
    }
}

/// Single-bit modifier masks, positionally indexed by `code - 0xE0`.
pub(crate) const MODIFIER_MASKS: [u8; 8] = [
    0x01, // left control
    0x02, // left shift
    0x04, // left alt
    0x08, // left meta
    0x10, // right control
    0x20, // right shift
    0x40, // right alt
    0x80, // right meta
];

/// One keyboard input snapshot.
///
/// `pressed_keys` is densely packed from index 0; the first entry at or
/// below [`KeyCode::ERROR_UNDEFINED`] marks end-of-data. Modifier keys are
/// reported only through the `modifiers` bitfield.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardData {
    pub modifiers: u8,
    pub pressed_keys: [u8; MAX_PRESSED_KEYS],
}

impl KeyboardData {
    /// No keys and no modifiers pressed.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            modifiers: 0,
            pressed_keys: [0; MAX_PRESSED_KEYS],
        }
    }
}

/// Mouse button bitfield.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseButtons(pub u8);

impl MouseButtons {
    pub const LEFT: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const MIDDLE: Self = Self(1 << 2);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: MouseButtons) -> bool {
        (self.0 & button.0) == button.0
    }
}

/// One mouse input snapshot (relative deltas since the previous report).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseData {
    pub delta_x: i32,
    pub delta_y: i32,
    pub buttons: MouseButtons,
    pub scroll_wheel: i8,
    pub misc_buttons: MiscButtons,
}

/// One balance-board snapshot: four load cells plus board temperature.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BalanceBoardData {
    pub top_right: u16,
    pub bottom_right: u16,
    pub top_left: u16,
    pub bottom_left: u16,
    pub temperature: i32,
}

/// Latest raw snapshot for one slot, tagged by device class.
///
/// The radio stack overwrites the whole value on every successful poll, so
/// the class tag always matches the payload it delivered last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerData {
    Gamepad(GamepadData),
    Keyboard(KeyboardData),
    Mouse(MouseData),
    BalanceBoard(BalanceBoardData),
}

impl ControllerData {
    /// Get the gamepad snapshot, if this slot last reported as a gamepad.
    #[inline]
    #[must_use]
    pub const fn gamepad(&self) -> Option<&GamepadData> {
        match self {
            ControllerData::Gamepad(data) => Some(data),
            _ => None,
        }
    }

    /// Get the keyboard snapshot, if this slot last reported as a keyboard.
    #[inline]
    #[must_use]
    pub const fn keyboard(&self) -> Option<&KeyboardData> {
        match self {
            ControllerData::Keyboard(data) => Some(data),
            _ => None,
        }
    }

    /// Get the mouse snapshot, if this slot last reported as a mouse.
    #[inline]
    #[must_use]
    pub const fn mouse(&self) -> Option<&MouseData> {
        match self {
            ControllerData::Mouse(data) => Some(data),
            _ => None,
        }
    }

    /// Get the balance-board snapshot, if this slot last reported as one.
    #[inline]
    #[must_use]
    pub const fn balance_board(&self) -> Option<&BalanceBoardData> {
        match self {
            ControllerData::BalanceBoard(data) => Some(data),
            _ => None,
        }
    }
}

impl Default for ControllerData {
    fn default() -> Self {
        ControllerData::Gamepad(GamepadData::neutral())
    }
}
