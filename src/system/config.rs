//! General system configuration

use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::{self, InterruptExt, Priority},
};

/// Create the HAL configuration
pub fn system_config() -> Config {
    // Generate default config, required because Config is set as
    // `non_exhaustive`
    let mut config = Config::default();

    // The SoftDevice starts the low-frequency clock itself
    config.hfclk_source = HfclkSource::ExternalXtal;
    config.lfclk_source = LfclkSource::ExternalXtal;

    // Enable DC/DC regulator to massively reduce runtime current consumption
    config.dcdc.reg1 = true;

    // Priorities 0, 1 and 4 are reserved for the SoftDevice
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;

    config.debug = Debug::Allowed;

    config
}

/// Move the peripheral interrupts the firmware binds off the reserved
/// SoftDevice levels
pub fn configure_interrupts() {
    interrupt::SAADC.set_priority(Priority::P3);
    interrupt::SPIM2_SPIS2_SPI2.set_priority(Priority::P3);
}
