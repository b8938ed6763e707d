//! Settings messages and their persisted form
//!
//! The phone sends the two display toggles as a small key/value message,
//! either by name (`showBattery`, `swapHourMinuteRings`) or over BLE as
//! `(id, value)` byte pairs. A message is only accepted when it carries both
//! toggles, so a partial message never ends up half written to flash.
//!
//! Each toggle is persisted as a ternary flag: a flag that was never written
//! stays [`Toggle::Unset`] and resolves to the [`DisplayMode`] default.

use crate::mode::DisplayMode;

/// Size of the persisted settings record
pub const RECORD_LEN: usize = 4;

/// Length of a complete settings message on the wire
pub const MESSAGE_LEN: usize = 4;

const RECORD_MAGIC: u8 = b'H';
const RECORD_VERSION: u8 = 1;

/// Keys understood in a settings message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    SwapHourMinuteRings,
    ShowBattery,
}

impl SettingKey {
    /// Look a key up by its message name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "swapHourMinuteRings" | "MinuteOnOut" => Some(Self::SwapHourMinuteRings),
            "showBattery" | "ShowBattery" => Some(Self::ShowBattery),
            _ => None,
        }
    }

    /// Look a key up by its BLE wire id
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::SwapHourMinuteRings),
            2 => Some(Self::ShowBattery),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Self::SwapHourMinuteRings => 1,
            Self::ShowBattery => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    #[error("settings message lacks {0:?}")]
    MissingKey(SettingKey),
    #[error("unknown settings key id {0}")]
    UnknownKeyId(u8),
    #[error("settings message ends inside a key/value pair")]
    Truncated,
    #[error("settings message is empty")]
    Empty,
}

/// A decoded, not yet validated settings update
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettingsMessage {
    pub swap_rings: Option<bool>,
    pub show_battery: Option<bool>,
}

impl SettingsMessage {
    /// Collect named key/value pairs. Values are truthy when non-zero and
    /// names that are not settings keys are skipped.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let mut message = Self::default();
        for (name, value) in pairs {
            match SettingKey::from_name(name) {
                Some(key) => message.set(key, value != 0),
                None => debug!("ignoring settings key"),
            }
        }
        message
    }

    /// Decode the BLE wire form: a sequence of `(id, value)` byte pairs
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SettingsError> {
        if bytes.is_empty() {
            return Err(SettingsError::Empty);
        }

        let mut message = Self::default();
        let mut pairs = bytes.chunks_exact(2);
        for pair in pairs.by_ref() {
            let key = SettingKey::from_id(pair[0]).ok_or(SettingsError::UnknownKeyId(pair[0]))?;
            message.set(key, pair[1] != 0);
        }
        if !pairs.remainder().is_empty() {
            return Err(SettingsError::Truncated);
        }
        Ok(message)
    }

    fn set(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::SwapHourMinuteRings => self.swap_rings = Some(value),
            SettingKey::ShowBattery => self.show_battery = Some(value),
        }
    }

    /// Encode a complete mode in the BLE wire form, as read back by a phone
    pub fn encode(mode: DisplayMode) -> [u8; MESSAGE_LEN] {
        [
            SettingKey::SwapHourMinuteRings.id(),
            mode.swap_hour_minute_rings as u8,
            SettingKey::ShowBattery.id(),
            mode.show_battery as u8,
        ]
    }

    /// The display mode carried by this message, if it is complete
    pub fn validate(&self) -> Result<DisplayMode, SettingsError> {
        let swap_hour_minute_rings = self
            .swap_rings
            .ok_or(SettingsError::MissingKey(SettingKey::SwapHourMinuteRings))?;
        let show_battery = self
            .show_battery
            .ok_or(SettingsError::MissingKey(SettingKey::ShowBattery))?;

        Ok(DisplayMode {
            swap_hour_minute_rings,
            show_battery,
        })
    }
}

/// Persisted flag that remembers whether it was ever written
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Toggle {
    #[default]
    Unset,
    Off,
    On,
}

impl Toggle {
    pub fn resolve(self, default: bool) -> bool {
        match self {
            Toggle::Unset => default,
            Toggle::Off => false,
            Toggle::On => true,
        }
    }

    fn to_byte(self) -> u8 {
        match self {
            Toggle::Unset => 0,
            Toggle::Off => 1,
            Toggle::On => 2,
        }
    }

    fn from_byte(byte: u8) -> Result<Self, RecordError> {
        match byte {
            0 => Ok(Toggle::Unset),
            1 => Ok(Toggle::Off),
            2 => Ok(Toggle::On),
            _ => Err(RecordError::BadFlag(byte)),
        }
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        if value {
            Toggle::On
        } else {
            Toggle::Off
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    #[error("settings record has a bad magic byte")]
    BadMagic,
    #[error("settings record version {0} is not supported")]
    UnsupportedVersion(u8),
    #[error("settings record holds invalid flag {0}")]
    BadFlag(u8),
}

/// Display flags as kept in the key/value store
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoredSettings {
    pub swap_rings: Toggle,
    pub show_battery: Toggle,
}

impl StoredSettings {
    /// Effective display mode, falling back to defaults for unset flags
    pub fn resolve(&self) -> DisplayMode {
        let default = DisplayMode::default();
        DisplayMode {
            swap_hour_minute_rings: self.swap_rings.resolve(default.swap_hour_minute_rings),
            show_battery: self.show_battery.resolve(default.show_battery),
        }
    }

    pub fn to_record(&self) -> [u8; RECORD_LEN] {
        [
            RECORD_MAGIC,
            RECORD_VERSION,
            self.swap_rings.to_byte(),
            self.show_battery.to_byte(),
        ]
    }

    /// Decode a flash record. Erased flash decodes as all flags unset.
    pub fn from_record(record: &[u8; RECORD_LEN]) -> Result<Self, RecordError> {
        if record.iter().all(|b| *b == 0xff) {
            return Ok(Self::default());
        }
        if record[0] != RECORD_MAGIC {
            return Err(RecordError::BadMagic);
        }
        if record[1] != RECORD_VERSION {
            return Err(RecordError::UnsupportedVersion(record[1]));
        }

        Ok(Self {
            swap_rings: Toggle::from_byte(record[2])?,
            show_battery: Toggle::from_byte(record[3])?,
        })
    }
}

impl From<DisplayMode> for StoredSettings {
    fn from(mode: DisplayMode) -> Self {
        Self {
            swap_rings: mode.swap_hour_minute_rings.into(),
            show_battery: mode.show_battery.into(),
        }
    }
}

/// Key/value store that survives restarts
pub trait SettingsStore {
    type Error: core::fmt::Debug;

    async fn load(&mut self) -> Result<StoredSettings, Self::Error>;

    async fn save(&mut self, settings: &StoredSettings) -> Result<(), Self::Error>;
}

/// Load the persisted display mode, using defaults if the store fails
pub async fn load_mode<S: SettingsStore>(store: &mut S) -> DisplayMode {
    match store.load().await {
        Ok(stored) => {
            let mode = stored.resolve();
            info!("Display mode loaded: {}", mode);
            mode
        }
        Err(_) => {
            warn!("Settings store unreadable, using defaults");
            DisplayMode::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_message_with_both_keys() {
        let message = SettingsMessage::from_pairs([("MinuteOnOut", 1), ("ShowBattery", 0)]);
        assert_eq!(
            message.validate(),
            Ok(DisplayMode {
                swap_hour_minute_rings: true,
                show_battery: false,
            })
        );
    }

    #[test]
    fn unknown_names_are_skipped() {
        let message = SettingsMessage::from_pairs([
            ("theme", 3),
            ("showBattery", 1),
            ("swapHourMinuteRings", 0),
        ]);
        assert_eq!(message.validate(), Ok(DisplayMode::default()));
    }

    #[test]
    fn partial_message_is_rejected() {
        let message = SettingsMessage::from_pairs([("showBattery", 1)]);
        assert_eq!(
            message.validate(),
            Err(SettingsError::MissingKey(SettingKey::SwapHourMinuteRings))
        );
    }

    #[test]
    fn wire_message() {
        let message = SettingsMessage::from_bytes(&[2, 0, 1, 1]).unwrap();
        assert_eq!(message.swap_rings, Some(true));
        assert_eq!(message.show_battery, Some(false));

        assert_eq!(SettingsMessage::from_bytes(&[]), Err(SettingsError::Empty));
        assert_eq!(
            SettingsMessage::from_bytes(&[1, 1, 2]),
            Err(SettingsError::Truncated)
        );
        assert_eq!(
            SettingsMessage::from_bytes(&[7, 1]),
            Err(SettingsError::UnknownKeyId(7))
        );
    }

    #[test]
    fn encoded_mode_reads_back() {
        let mode = DisplayMode {
            swap_hour_minute_rings: true,
            show_battery: false,
        };
        assert_eq!(SettingsMessage::encode(mode), [1, 1, 2, 0]);
        let message = SettingsMessage::from_bytes(&SettingsMessage::encode(mode)).unwrap();
        assert_eq!(message.validate(), Ok(mode));
    }

    #[test]
    fn unset_flags_resolve_to_defaults() {
        let stored = StoredSettings {
            swap_rings: Toggle::On,
            show_battery: Toggle::Unset,
        };
        assert_eq!(
            stored.resolve(),
            DisplayMode {
                swap_hour_minute_rings: true,
                show_battery: true,
            }
        );
    }

    #[test]
    fn record_encoding() {
        let stored = StoredSettings::from(DisplayMode {
            swap_hour_minute_rings: false,
            show_battery: true,
        });
        assert_eq!(stored.to_record(), [b'H', 1, 1, 2]);
        assert_eq!(StoredSettings::from_record(&stored.to_record()), Ok(stored));
    }

    #[test]
    fn erased_and_corrupt_records() {
        assert_eq!(
            StoredSettings::from_record(&[0xff; RECORD_LEN]),
            Ok(StoredSettings::default())
        );
        assert_eq!(
            StoredSettings::from_record(&[0, 1, 1, 1]),
            Err(RecordError::BadMagic)
        );
        assert_eq!(
            StoredSettings::from_record(&[b'H', 9, 1, 1]),
            Err(RecordError::UnsupportedVersion(9))
        );
        assert_eq!(
            StoredSettings::from_record(&[b'H', 1, 1, 5]),
            Err(RecordError::BadFlag(5))
        );
    }
}
