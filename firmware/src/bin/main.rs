#![no_std]
#![no_main]

use button_core::transport::RX_BUFFER_SIZE;
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::{error, info, warn, Debug2Format};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{Stack, StackResources};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{DMA_CH0, I2C0, PIO0};
use embassy_rp::pio::{self, Pio};
use embassy_time::{Delay, Instant};
use osc_button::{
    settings, wifi, ButtonController, Config, Drv2605, LoopSettings, LoopTicker, StatusLed,
    UdpChannel,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Radio state shared with the runner task.
static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();

/// Socket slots for the network stack (UDP + DHCP).
static NET_RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("OSC button starting...");

    let config = match settings::load() {
        Ok(config) => config,
        Err(e) => defmt::panic!("Invalid configuration: {}", e),
    };

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Radio Setup ---
    let fw = include_bytes!("../../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../../cyw43-firmware/43439A0_clm.bin");

    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(cyw43_task(runner).unwrap());

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    // --- Network Stack ---
    let net_config = embassy_net::Config::dhcpv4(Default::default());
    // Seed from uptime; the RP2040 has no hardware RNG
    let seed = Instant::now().as_ticks() ^ 0x9E37_79B9_7F4A_7C15;
    let (stack, net_runner) = embassy_net::new(
        net_device,
        net_config,
        NET_RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(net_task(net_runner).unwrap());

    // --- WiFi ---
    let mut led = StatusLed::new(config.status_led);
    if let Err(e) = wifi::join(
        &mut control,
        &mut led,
        config.wifi_ssid,
        config.wifi_password,
        config.retry,
    )
    .await
    {
        error!("Failed to connect to WiFi. Check credentials and try again.");
        defmt::panic!("WiFi join gave up: {}", e);
    }

    info!("Waiting for DHCP...");
    stack.wait_config_up().await;
    log_connectivity(stack, &config);

    // --- Socket ---
    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_meta = [PacketMetadata::EMPTY; 4];
    let mut tx_buffer = [0u8; 512];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    if let Err(e) = socket.bind(config.endpoint.listen_port) {
        defmt::panic!("Failed to bind UDP port {}: {}", config.endpoint.listen_port, e);
    }
    let channel = UdpChannel::new(socket, config.endpoint.destination);

    // --- Button ---
    let button = Input::new(p.PIN_26, Pull::Up);

    // --- Haptic (optional) ---
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let haptic = match Drv2605::probe(i2c).await {
        Ok(driver) => Some(driver),
        Err(e) => {
            warn!("No haptic driver ({}), /haptic/play will be ignored", e);
            None
        }
    };

    let mut controller =
        ButtonController::new(channel, button, haptic, LoopSettings::from(&config));

    if let Err(e) = controller
        .handshake(config.identity, config.retry, &mut Delay)
        .await
    {
        warn!("Handshake not delivered: {}", e);
    }

    info!("Ready! Press button...");
    let mut ticks = LoopTicker::every_ms(config.tick_ms);
    controller.run(&mut ticks).await
}

/// Print addresses and a same-subnet guess to help diagnose routing.
fn log_connectivity(stack: Stack<'_>, config: &Config<'_>) {
    let Some(v4) = stack.config_v4() else {
        return;
    };
    let local = v4.address.address();

    info!("IP address: {}", Debug2Format(&local));
    info!("Gateway: {}", Debug2Format(&v4.gateway));
    info!("Prefix length: {}", v4.address.prefix_len());
    info!("Target PC: {}", Debug2Format(&config.endpoint.destination));
    info!("Likely same subnet: {}", config.endpoint.likely_same_subnet(local));
}

/// Radio driver task - runs the CYW43 bus.
#[embassy_executor::task]
async fn cyw43_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

/// Network stack task - runs embassy-net.
#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}
