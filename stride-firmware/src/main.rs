//! Stride - Pedometer Watchface Firmware
//!
//! Main firmware binary for RP2040-based wearables. Counts steps from a
//! wrist-mounted accelerometer, clears the count at the end of each day
//! and asks the paired phone for weather every half hour.
//!
//! # Board Wiring
//!
//! ```text
//! GPIO0/1   UART0 TX/RX  Bluetooth UART bridge (phone link)
//! GPIO2     Input        Bluetooth module STATE (high = connected)
//! GPIO4/5   I2C0 SDA/SCL LIS3DH accelerometer
//! GPIO6/7   I2C1 SDA/SCL SH1106 128x64 OLED
//! GPIO15    Output       Vibration motor driver
//! GPIO29    ADC3         VSYS / 3
//! ```

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C0, I2C1, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use stride_hal_rp2040::flash::Rp2040FlashStorage;
use stride_hal_rp2040::gpio::Rp2040OutputPin;

use crate::config::ConfigPersistence;

mod channels;
mod clock;
mod config;
mod handlers;
mod store;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
    I2C1_IRQ => I2cInterruptHandler<I2C1>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// Bluetooth UART bridge baud rate
const LINK_BAUDRATE: u32 = 9600;

/// Sensor and panel bus speed
const I2C_FREQUENCY: u32 = 400_000;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Stride firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load configuration and the saved step count from flash
    let mut persistence = ConfigPersistence::new(Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0));
    let config = persistence.load_or_default().await;
    let steps = persistence.load_step_count().await;
    let storage = persistence.into_storage();

    // Setup UART for the phone link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = LINK_BAUDRATE;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let link_state = Input::new(p.PIN_2, Pull::Down);

    info!("UART initialized for phone link");

    // Setup the two I2C buses
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY;
    let accel_bus = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config.clone());
    let display_bus = I2c::new_async(p.I2C1, p.PIN_7, p.PIN_6, Irqs, i2c_config);

    // Setup ADC for battery sensing
    let adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let vsys = Channel::new_pin(p.PIN_29, Pull::None);

    // Vibration motor
    let vibe_pin = Rp2040OutputPin::new(Output::new(p.PIN_15, Level::Low));

    info!("Peripherals configured");

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner.spawn(tasks::connection_task(link_state)).unwrap();
    spawner
        .spawn(tasks::accel_task(accel_bus, config.pedometer))
        .unwrap();
    spawner.spawn(tasks::display_task(display_bus)).unwrap();
    spawner.spawn(tasks::battery_task(adc, vsys)).unwrap();
    spawner.spawn(tasks::vibe_task(vibe_pin)).unwrap();
    spawner.spawn(tasks::persist_task(storage, steps)).unwrap();
    spawner.spawn(tasks::app_task(config, steps)).unwrap();

    info!("All tasks spawned, firmware running");
}
