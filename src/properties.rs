//! Per-connection device metadata: type, identity and capability flags.
//!
//! Properties are fetched once when a slot connects and stay cached until
//! the next connection overwrites them (see [`crate::controller`]).

/// Device type reported by the radio stack.
///
/// Discriminants follow the wire values used by the radio stack, so an
/// implementation can map reports with a plain cast-and-match.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ControllerType {
    #[default]
    Unknown = 0,
    UnknownSteam = 1,
    Steam = 2,
    SteamV2 = 3,
    Xbox360 = 30,
    XboxOne = 31,
    DualShock3 = 32,
    DualShock4 = 33,
    Wii = 34,
    Apple = 35,
    Android = 36,
    SwitchPro = 37,
    SwitchJoyConLeft = 38,
    SwitchJoyConRight = 39,
    SwitchJoyConPair = 40,
    SwitchInputOnly = 41,
    MobileTouch = 42,
    XinputSwitch = 43,
    DualSense = 44,
    ICade = 50,
    SmartTvRemote = 51,
    EightBitdo = 52,
    Generic = 53,
    Nimbus = 54,
    Ouya = 55,
    Keyboard = 60,
    Mouse = 61,
}

/// Human-readable model names, scanned linearly; first exact match wins.
///
/// `ControllerType::Unknown` is deliberately absent so a miss falls through
/// to the [`MODEL_NAME_UNKNOWN`] sentinel.
pub(crate) const MODEL_NAMES: &[(ControllerType, &str)] = &[
    (ControllerType::UnknownSteam, "Unknown Steam"),
    (ControllerType::Steam, "Steam"),
    (ControllerType::SteamV2, "Steam V2"),
    (ControllerType::Xbox360, "XBox 360"),
    (ControllerType::XboxOne, "XBox One"),
    (ControllerType::DualShock3, "DualShock 3"),
    (ControllerType::DualShock4, "DualShock 4"),
    (ControllerType::Wii, "Wii"),
    (ControllerType::Apple, "Apple"),
    (ControllerType::Android, "Android"),
    (ControllerType::SwitchPro, "Switch Pro"),
    (ControllerType::SwitchJoyConLeft, "Switch JoyCon Left"),
    (ControllerType::SwitchJoyConRight, "Switch JoyCon Right"),
    (ControllerType::SwitchJoyConPair, "Switch JoyCon Pair"),
    (ControllerType::SwitchInputOnly, "Switch Input Only"),
    (ControllerType::MobileTouch, "Mobile Touch"),
    (ControllerType::XinputSwitch, "XInput Switch"),
    (ControllerType::DualSense, "DualSense"),
    (ControllerType::ICade, "iCade"),
    (ControllerType::SmartTvRemote, "Smart TV Remote"),
    (ControllerType::EightBitdo, "8BitDo"),
    (ControllerType::Generic, "Generic"),
    (ControllerType::Nimbus, "Nimbus"),
    (ControllerType::Ouya, "OUYA"),
    (ControllerType::Keyboard, "Keyboard"),
    (ControllerType::Mouse, "Mouse"),
];

/// Name returned for device types with no table entry.
pub const MODEL_NAME_UNKNOWN: &str = "Unknown";

/// Look up the human-readable model name for a device type.
#[must_use]
pub fn model_name(controller_type: ControllerType) -> &'static str {
    for (candidate, name) in MODEL_NAMES.iter().copied() {
        if candidate == controller_type {
            return name;
        }
    }
    MODEL_NAME_UNKNOWN
}

/// Descriptive metadata for one connection.
///
/// Valid only while the owning slot is connected; a disconnected slot keeps
/// the last-known value until the next connection overwrites it.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerProperties {
    /// Bluetooth address of the device, most significant byte first.
    pub address: [u8; 6],
    pub controller_type: ControllerType,
    pub subtype: u8,
    pub vendor_id: u16,
    pub product_id: u16,
    /// Capability bits, see the `FLAG_*` constants.
    pub flags: u16,
}

impl ControllerProperties {
    /// Device has a rumble actuator.
    pub const FLAG_RUMBLE: u16 = 1 << 0;
    /// Device has player-indicator LEDs.
    pub const FLAG_PLAYER_LEDS: u16 = 1 << 1;
    /// Device has an RGB lightbar.
    pub const FLAG_PLAYER_LIGHTBAR: u16 = 1 << 2;

    /// Check if a capability flag is set.
    #[inline]
    #[must_use]
    pub const fn has_flag(&self, flag: u16) -> bool {
        (self.flags & flag) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_name_hits() {
        assert_eq!(model_name(ControllerType::DualSense), "DualSense");
        assert_eq!(model_name(ControllerType::Xbox360), "XBox 360");
        assert_eq!(model_name(ControllerType::EightBitdo), "8BitDo");
        assert_eq!(model_name(ControllerType::Keyboard), "Keyboard");
    }

    #[test]
    fn test_model_name_miss_returns_sentinel() {
        assert_eq!(model_name(ControllerType::Unknown), MODEL_NAME_UNKNOWN);
    }

    #[test]
    fn test_model_name_table_has_no_duplicate_keys() {
        for (i, (a, _)) in MODEL_NAMES.iter().enumerate() {
            for (b, _) in &MODEL_NAMES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_default_properties() {
        let props = ControllerProperties::default();
        assert_eq!(props.controller_type, ControllerType::Unknown);
        assert!(!props.has_flag(ControllerProperties::FLAG_RUMBLE));
    }
}
