//! Bluetooth module

// Core
use core::mem;

// BLE
use nrf_softdevice::{
    self,
    ble::advertisement_builder::{
        Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList, ServiceUuid16,
    },
    raw, Config,
};

const DEVICE_NAME: &[u8] = b"Helium";

pub static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(
        ServiceList::Incomplete,
        &[ServiceUuid16::BATTERY, ServiceUuid16::CURRENT_TIME],
    )
    .full_name("Helium")
    .build();

pub static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_128(
        ServiceList::Complete,
        &[0x9f3c0001_5b4e_4a8a_9c36_6d1b2f0e7a11_u128.to_le_bytes()],
    )
    .build();

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub bas: BatteryService,
    pub cts: CurrentTimeService,
    pub helium: HeliumService,
}

#[nrf_softdevice::gatt_service(uuid = "180f")]
pub struct BatteryService {
    #[characteristic(uuid = "2a19", read, notify)]
    pub battery_level: u8,
}

#[nrf_softdevice::gatt_service(uuid = "1805")]
pub struct CurrentTimeService {
    /// Exact time 256 plus adjust reason
    #[characteristic(uuid = "2a2b", write)]
    pub current_time: [u8; 10],
}

#[nrf_softdevice::gatt_service(uuid = "9f3c0001-5b4e-4a8a-9c36-6d1b2f0e7a11")]
pub struct HeliumService {
    /// Display toggles as `(id, value)` byte pairs
    #[characteristic(uuid = "9f3c0002-5b4e-4a8a-9c36-6d1b2f0e7a11", read, write)]
    pub settings: [u8; 4],
}

/// SoftDevice configuration for a single peripheral link
pub fn softdevice_config() -> Config {
    Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_XTAL as u8,
            rc_ctiv: 0,
            rc_temp_ctiv: 0,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_20_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}
