//! Settings baked in at build time.
//!
//! Each key is read with `option_env!` when the firmware is compiled, e.g.
//!
//! ```text
//! WIFI_SSID=studio WIFI_PASSWORD=hunter22 PC_IP=192.168.1.20 cargo run --release
//! ```

use button_core::config::keys;
use button_core::{Config, ConfigError};

fn lookup(key: &str) -> Option<&'static str> {
    match key {
        keys::WIFI_SSID => option_env!("WIFI_SSID"),
        keys::WIFI_PASSWORD => option_env!("WIFI_PASSWORD"),
        keys::PC_IP => option_env!("PC_IP"),
        keys::PORT => option_env!("PORT"),
        keys::LISTEN_PORT => option_env!("LISTEN_PORT"),
        keys::DEVICE_ID => option_env!("DEVICE_ID"),
        keys::HAPTIC_EFFECT => option_env!("HAPTIC_EFFECT"),
        keys::HAPTIC_ON_PRESS => option_env!("HAPTIC_ON_PRESS"),
        keys::EVENT_PAYLOAD => option_env!("EVENT_PAYLOAD"),
        keys::STATUS_LED => option_env!("STATUS_LED"),
        _ => None,
    }
}

/// Validate the compiled-in settings.
pub fn load() -> Result<Config<'static>, ConfigError> {
    Config::from_lookup(lookup)
}
