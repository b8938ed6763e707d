#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Level, Output, OutputDrive},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel, signal::Signal};
use embassy_time::{Duration, Timer};
use nrf_softdevice::{
    ble::{gatt_server, peripheral},
    Flash, Softdevice,
};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use helium::{
    settings::{load_mode, SettingsMessage, SettingsStore, MESSAGE_LEN},
    ui::HeliumWatchface,
    ConnectivityState, DisplayMode, FaceConfig, FaceContext, FaceEvent, Haptics,
};
use peripherals::{
    battery::Battery,
    display::{BacklightPins, Display},
    vibrator::{PulseLength, Vibrator},
};
use system::{
    bluetooth::{
        self, BatteryServiceEvent, CurrentTimeServiceEvent, HeliumServiceEvent, Server,
        ServerEvent,
    },
    config,
    flash::FlashSettingsStore,
    time::{TimeManager, TimeReference},
};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));
const TIMEZONE: i32 = 1 * 3_600;

/// Everything the face task reacts to
enum Message {
    Face(FaceEvent),
    /// Raw settings characteristic write
    Settings([u8; MESSAGE_LEN]),
    SetTime(TimeReference),
}

// Communication channels
static EVENTS: Channel<ThreadModeRawMutex, Message, 8> = Channel::new();
static NOTIFY: Signal<ThreadModeRawMutex, u8> = Signal::new();

static SERVER: StaticCell<Server> = StaticCell::new();

/// Haptic alerts are handed to the notify task
struct NotifyHaptics;

impl Haptics for NotifyHaptics {
    fn double_pulse(&mut self) {
        NOTIFY.signal(2);
    }
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Vibrate whenever an alert is signaled
#[embassy_executor::task(pool_size = 1)]
async fn notify(mut vibrator: Vibrator) {
    loop {
        let count = NOTIFY.wait().await;
        vibrator.pulse(PulseLength::SHORT, Some(count)).await;
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery) {
    loop {
        if let Some(state) = battery.update().await {
            defmt::info!("Battery status: {}%", state.percent());
            EVENTS
                .send(Message::Face(FaceEvent::BatteryChanged(state)))
                .await;
        }

        // Re-schedule the timer interrupt in 10s
        Timer::after(Duration::from_secs(10)).await;
    }
}

/// Signal every minute boundary
#[embassy_executor::task(pool_size = 1)]
async fn minute_tick(clock: TimeManager) {
    loop {
        // Land just past the boundary so the next wait is a full minute
        Timer::after(clock.until_next_minute() + Duration::from_millis(5)).await;
        EVENTS.send(Message::Face(FaceEvent::TimeTick)).await;
    }
}

/// Advertise, then serve one connection at a time
#[embassy_executor::task(pool_size = 1)]
async fn bluetooth_task(sd: &'static Softdevice, server: &'static Server) {
    let config = peripheral::Config::default();
    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &bluetooth::ADV_DATA,
            scan_data: &bluetooth::SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                defmt::warn!("Advertising failed: {}", e);
                Timer::after(Duration::from_secs(1)).await;
                continue;
            }
        };

        defmt::info!("Phone connected");
        EVENTS
            .send(Message::Face(FaceEvent::ConnectivityChanged(
                ConnectivityState::CONNECTED,
            )))
            .await;

        let e = gatt_server::run(&conn, server, |e| match e {
            ServerEvent::Bas(BatteryServiceEvent::BatteryLevelCccdWrite { notifications }) => {
                defmt::debug!("Battery notifications: {}", notifications);
            }
            ServerEvent::Cts(CurrentTimeServiceEvent::CurrentTimeWrite(bytes)) => {
                match TimeReference::from_cts_bytes(&bytes) {
                    Ok(reference) => {
                        if EVENTS.try_send(Message::SetTime(reference)).is_err() {
                            defmt::warn!("Event queue full, time update lost");
                        }
                    }
                    Err(e) => defmt::warn!("Bad current time: {}", e),
                }
            }
            ServerEvent::Helium(HeliumServiceEvent::SettingsWrite(bytes)) => {
                if EVENTS.try_send(Message::Settings(bytes)).is_err() {
                    defmt::warn!("Event queue full, settings lost");
                }
            }
        })
        .await;

        defmt::info!("Phone disconnected: {}", e);
        EVENTS
            .send(Message::Face(FaceEvent::ConnectivityChanged(
                ConnectivityState::DISCONNECTED,
            )))
            .await;
    }
}

/// Keep the readable settings characteristic in sync with the active mode
fn publish_settings(server: &Server, mode: DisplayMode) {
    if let Err(e) = server.helium.settings_set(&SettingsMessage::encode(mode)) {
        defmt::warn!("Settings characteristic not updated: {}", e);
    }
}

/// Single owner of the face state: applies events, persists settings and
/// redraws the LCD whenever the face is dirty.
#[embassy_executor::task(pool_size = 1)]
async fn run_face(
    mut display: Display<SPI2>,
    mut store: FlashSettingsStore,
    server: &'static Server,
    clock: TimeManager,
    initial: helium::BatteryState,
) {
    let face_config = FaceConfig {
        utc_offset_secs: TIMEZONE,
        ..FaceConfig::default()
    };
    let mode = load_mode(&mut store).await;
    publish_settings(server, mode);
    let mut face = FaceContext::new(
        HeliumWatchface::new(face_config.palette),
        &face_config,
        mode,
        initial,
        ConnectivityState::DISCONNECTED,
    );
    let mut haptics = NotifyHaptics;

    loop {
        if let Some(frame) = face.render_if_dirty(&clock, display.bounds()) {
            if let Err(e) = display.draw_frame(&frame) {
                defmt::warn!("Display update failed: {}", e);
            }
        }

        let reaction = match EVENTS.receive().await {
            Message::Face(event) => {
                if let FaceEvent::BatteryChanged(state) = event {
                    if let Err(e) = server.bas.battery_level_set(&state.percent()) {
                        defmt::warn!("Battery characteristic not updated: {}", e);
                    }
                }
                face.handle(event)
            }
            Message::Settings(bytes) => {
                match SettingsMessage::from_bytes(&bytes).and_then(|m| face.apply_settings(&m)) {
                    Ok(reaction) => {
                        publish_settings(server, face.mode());
                        reaction
                    }
                    Err(e) => {
                        defmt::warn!("Settings ignored: {}", e);
                        continue;
                    }
                }
            }
            Message::SetTime(reference) => {
                clock.set_time(reference);
                face.handle(FaceEvent::TimeTick)
            }
        };

        reaction.alert(&mut haptics);
        if let Some(settings) = reaction.persist {
            if let Err(e) = store.save(&settings).await {
                defmt::warn!("Settings not persisted: {}", e);
            }
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(config::system_config());
    config::configure_interrupts();
    defmt::info!("Initializing");

    // Initialize Bluetooth
    let sd = Softdevice::enable(&bluetooth::softdevice_config());
    let server = SERVER.init(unwrap!(Server::new(sd)));
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initalize Battery
    let mut battery = Battery::init(saadc);
    let initial = battery.state().await;

    // Initialize vibration motor
    let vibrator = Vibrator::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let backlight = BacklightPins::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
    );
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
        backlight,
    ));

    // Settings storage
    let store = FlashSettingsStore::init(Flash::take(sd));

    // Start the clock from the build time until a phone sets it
    let clock = TimeManager::init(TimeReference::from_timestamp(UTC_EPOCH));

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(run_face(display, store, server, clock, initial)));
    unwrap!(spawner.spawn(update_battery_status(battery)));
    unwrap!(spawner.spawn(minute_tick(clock)));
    unwrap!(spawner.spawn(bluetooth_task(sd, server)));
    unwrap!(spawner.spawn(notify(vibrator)));
}
