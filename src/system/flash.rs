//! Settings storage on the internal flash
//!
//! The SoftDevice owns the NVMC while it is enabled, so all flash access
//! goes through its flash API.

use embedded_storage_async::nor_flash::{NorFlash, ReadNorFlash};
use helium::settings::{RecordError, SettingsStore, StoredSettings, RECORD_LEN};
use nrf_softdevice::{Flash, FlashError};

/// Last flash page, kept out of the application image by `memory.x`
pub const SETTINGS_PAGE: u32 = 0x7_f000;

#[derive(Debug, defmt::Format)]
pub enum Error {
    Flash(FlashError),
    Record(RecordError),
}

/// The SoftDevice writes whole words from word-aligned buffers
#[repr(C, align(4))]
struct Aligned([u8; RECORD_LEN]);

pub struct FlashSettingsStore {
    flash: Flash,
}

impl FlashSettingsStore {
    /// Take over the flash page used for settings
    pub fn init(flash: Flash) -> Self {
        Self { flash }
    }
}

impl SettingsStore for FlashSettingsStore {
    type Error = Error;

    async fn load(&mut self) -> Result<StoredSettings, Self::Error> {
        let mut record = Aligned([0; RECORD_LEN]);
        self.flash
            .read(SETTINGS_PAGE, &mut record.0)
            .await
            .map_err(Error::Flash)?;
        StoredSettings::from_record(&record.0).map_err(Error::Record)
    }

    async fn save(&mut self, settings: &StoredSettings) -> Result<(), Self::Error> {
        self.flash
            .erase(SETTINGS_PAGE, SETTINGS_PAGE + Flash::ERASE_SIZE as u32)
            .await
            .map_err(Error::Flash)?;
        let record = Aligned(settings.to_record());
        self.flash
            .write(SETTINGS_PAGE, &record.0)
            .await
            .map_err(Error::Flash)
    }
}
