//! Platform-agnostic wireless HID controller pool with polling connection
//! tracking.
//!
//! This crate exposes a fixed pool of wireless controllers (gamepads,
//! keyboards, mice, balance boards) to an embedded application through a
//! polling API, without depending on any concrete radio stack. It can be
//! used both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Raw input snapshots ([`ControllerData`], [`GamepadData`],
//!   [`KeyboardData`], [`Buttons`], [`KeyCode`])
//! - [`properties`]: Per-connection metadata ([`ControllerProperties`],
//!   [`ControllerType`])
//! - [`radio`]: Radio capability trait ([`HidRadio`])
//! - [`controller`]: One slot's state and commands ([`Controller`])
//! - [`hub`]: Poll/diff/dispatch cycle ([`ControllerHub`])
//!
//! # How it works
//!
//! The application constructs one [`ControllerHub`] over an [`HidRadio`]
//! implementation, registers connect/disconnect callbacks with
//! [`ControllerHub::setup`], and calls [`ControllerHub::update`] once per
//! iteration of its main loop. Every update polls all slots, diffs the
//! connected-set against the previous poll, and fires each callback exactly
//! once per transition. Between updates, slots answer queries (button/key
//! state, model name) from cached data with no I/O.
//!
//! # Example
//!
//! ```rust
//! use radiopad::{ControllerHub, NullRadio};
//!
//! fn on_connect(controller: &radiopad::Controller) {
//!     // Fires once, with properties already cached
//!     assert!(controller.is_connected());
//! }
//!
//! fn on_disconnect(controller: &radiopad::Controller) {
//!     // Fires once, while last-known state is still readable
//!     let _ = controller.model_name();
//! }
//!
//! let mut hub = ControllerHub::new(NullRadio);
//! hub.setup(on_connect, on_disconnect);
//!
//! loop {
//!     hub.update();
//!     if let Some(pad) = hub.controller(0) {
//!         if let Some(gamepad) = pad.gamepad() {
//!             let _ = gamepad.buttons;
//!         }
//!     }
//!     # break;
//! }
//! ```
//!
//! # Error Handling
//!
//! Nothing in this crate panics or propagates errors upward. A failing
//! fetch is treated as "slot not connected this poll"; a command issued on
//! a disconnected slot, or refused by the device, is logged through the
//! [`log`] facade and otherwise ignored. The design favors availability
//! (keep polling, keep serving last-known data) over strict error
//! signaling.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod controller;
pub mod hub;
pub mod properties;
pub mod radio;
pub mod types;

// Re-export main types at crate root
pub use controller::Controller;
pub use hub::{ControllerCallback, ControllerHub};
pub use properties::{model_name, ControllerProperties, ControllerType, MODEL_NAME_UNKNOWN};
pub use radio::{HidRadio, NullRadio, RadioError};
pub use types::{
    AnalogStick, BalanceBoardData, Buttons, ControllerData, Dpad, GamepadData, KeyCode,
    KeyboardData, MiscButtons, MouseButtons, MouseData, MAX_CONTROLLERS, MAX_PRESSED_KEYS,
};

/// Version string reported by [`ControllerHub::version`].
pub const VERSION: &str = concat!("radiopad v", env!("CARGO_PKG_VERSION"));
