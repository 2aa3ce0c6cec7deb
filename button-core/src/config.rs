//! Startup configuration from named values.
//!
//! Values come from a lookup function so the source stays pluggable: the
//! firmware reads compile-time environment variables, tests use a table.
//!
//! | Key | Required | Default |
//! |-----|----------|---------|
//! | `WIFI_SSID` | yes | |
//! | `WIFI_PASSWORD` | yes | |
//! | `PC_IP` | yes | |
//! | `PORT` | no | `5000` |
//! | `LISTEN_PORT` | no | `9000` |
//! | `DEVICE_ID` | no | `1` |
//! | `HAPTIC_EFFECT` | no | `1` |
//! | `HAPTIC_ON_PRESS` | no | `false` |
//! | `EVENT_PAYLOAD` | no | `counter` |
//! | `STATUS_LED` | no | `true` |

use core::net::{Ipv4Addr, SocketAddrV4};
use core::str::FromStr;

use crate::edge::DEFAULT_DEBOUNCE_MS;
use crate::haptic::DEFAULT_HAPTIC_EFFECT;
use crate::retry::RetryPolicy;
use crate::transport::{DeviceIdentity, SessionEndpoint};

/// Configuration key names.
pub mod keys {
    pub const WIFI_SSID: &str = "WIFI_SSID";
    pub const WIFI_PASSWORD: &str = "WIFI_PASSWORD";
    pub const PC_IP: &str = "PC_IP";
    pub const PORT: &str = "PORT";
    pub const LISTEN_PORT: &str = "LISTEN_PORT";
    pub const DEVICE_ID: &str = "DEVICE_ID";
    pub const HAPTIC_EFFECT: &str = "HAPTIC_EFFECT";
    pub const HAPTIC_ON_PRESS: &str = "HAPTIC_ON_PRESS";
    pub const EVENT_PAYLOAD: &str = "EVENT_PAYLOAD";
    pub const STATUS_LED: &str = "STATUS_LED";
}

/// Listener port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;
/// Local command port used when `LISTEN_PORT` is unset.
pub const DEFAULT_LISTEN_PORT: u16 = 9000;
/// Control loop period.
pub const DEFAULT_TICK_MS: u64 = 50;

/// Highest effect id in the DRV2605 ROM libraries.
const MAX_HAPTIC_EFFECT: u8 = 123;

/// Error type for configuration loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A required key is absent or empty.
    Missing(&'static str),
    /// A key is present but its value does not parse.
    Invalid(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "{key} is required"),
            Self::Invalid(key) => write!(f, "{key} has an invalid value"),
        }
    }
}

/// Argument carried by press and release events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventPayload {
    /// Address only.
    None,
    /// One Int32: the running press count (same value in the matching release).
    #[default]
    Counter,
}

impl FromStr for EventPayload {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            Ok(Self::None)
        } else if s.eq_ignore_ascii_case("counter") {
            Ok(Self::Counter)
        } else {
            Err(())
        }
    }
}

/// Validated device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config<'a> {
    /// Network name to join.
    pub wifi_ssid: &'a str,
    /// Network passphrase.
    pub wifi_password: &'a str,
    /// Listener destination and local command port.
    pub endpoint: SessionEndpoint,
    /// Number announced in the handshake.
    pub identity: DeviceIdentity,
    /// DRV2605 library effect id (1-123).
    pub haptic_effect: u8,
    /// Play the effect locally on every press.
    pub haptic_on_press: bool,
    /// Arguments carried by press and release messages.
    pub event_payload: EventPayload,
    /// Drive the on-board LED with connection status.
    pub status_led: bool,
    /// Control loop period in milliseconds.
    pub tick_ms: u64,
    /// Debounce hold in milliseconds.
    pub debounce_ms: u64,
    /// Attempts and spacing for WiFi join and the handshake.
    pub retry: RetryPolicy,
}

impl<'a> Config<'a> {
    /// Build a configuration from a key lookup.
    ///
    /// Empty values count as absent.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] for an absent required key (`WIFI_SSID`,
    /// `WIFI_PASSWORD`, `PC_IP`), [`ConfigError::Invalid`] for any value that
    /// does not parse.
    ///
    /// # Example
    ///
    /// ```
    /// use button_core::{Config, ConfigError};
    ///
    /// let lookup = |key: &str| match key {
    ///     "WIFI_SSID" => Some("studio"),
    ///     "WIFI_PASSWORD" => Some("hunter22"),
    ///     "PC_IP" => Some("192.168.1.20"),
    ///     _ => None,
    /// };
    /// let config = Config::from_lookup(lookup).unwrap();
    /// assert_eq!(config.endpoint.destination.port(), 5000);
    ///
    /// let missing = Config::from_lookup(|_| None);
    /// assert_eq!(missing, Err(ConfigError::Missing("WIFI_SSID")));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let get = |key: &str| lookup(key).map(str::trim).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let wifi_ssid = required(keys::WIFI_SSID)?;
        let wifi_password = required(keys::WIFI_PASSWORD)?;
        let pc_ip: Ipv4Addr = parse(keys::PC_IP, required(keys::PC_IP)?)?;

        let port = parse_port(keys::PORT, get(keys::PORT), DEFAULT_PORT)?;
        let listen_port = parse_port(
            keys::LISTEN_PORT,
            get(keys::LISTEN_PORT),
            DEFAULT_LISTEN_PORT,
        )?;

        let identity = match get(keys::DEVICE_ID) {
            Some(v) => DeviceIdentity(parse(keys::DEVICE_ID, v)?),
            None => DeviceIdentity::default(),
        };

        let haptic_effect = match get(keys::HAPTIC_EFFECT) {
            Some(v) => parse::<u8>(keys::HAPTIC_EFFECT, v)?,
            None => DEFAULT_HAPTIC_EFFECT,
        };
        if !(1..=MAX_HAPTIC_EFFECT).contains(&haptic_effect) {
            return Err(ConfigError::Invalid(keys::HAPTIC_EFFECT));
        }

        let event_payload = match get(keys::EVENT_PAYLOAD) {
            Some(v) => parse(keys::EVENT_PAYLOAD, v)?,
            None => EventPayload::default(),
        };

        Ok(Self {
            wifi_ssid,
            wifi_password,
            endpoint: SessionEndpoint {
                destination: SocketAddrV4::new(pc_ip, port),
                listen_port,
            },
            identity,
            haptic_effect,
            haptic_on_press: parse_flag(keys::HAPTIC_ON_PRESS, get(keys::HAPTIC_ON_PRESS), false)?,
            event_payload,
            status_led: parse_flag(keys::STATUS_LED, get(keys::STATUS_LED), true)?,
            tick_ms: DEFAULT_TICK_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            retry: RetryPolicy::DEFAULT,
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid(key))
}

fn parse_port(key: &'static str, value: Option<&str>, default: u16) -> Result<u16, ConfigError> {
    match value {
        Some(v) => match parse::<u16>(key, v)? {
            0 => Err(ConfigError::Invalid(key)),
            port => Ok(port),
        },
        None => Ok(default),
    }
}

fn parse_flag(key: &'static str, value: Option<&str>, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = value else {
        return Ok(default);
    };

    if ["1", "true", "yes", "on"].iter().any(|t| v.eq_ignore_ascii_case(t)) {
        Ok(true)
    } else if ["0", "false", "no", "off"].iter().any(|f| v.eq_ignore_ascii_case(f)) {
        Ok(false)
    } else {
        Err(ConfigError::Invalid(key))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    static BASE: [(&str, &str); 3] = [
        ("WIFI_SSID", "studio"),
        ("WIFI_PASSWORD", "hunter22"),
        ("PC_IP", "192.168.1.20"),
    ];

    fn load<'a>(extra: &'a [(&'a str, &'a str)]) -> Result<Config<'a>, ConfigError> {
        Config::from_lookup(|key| {
            extra
                .iter()
                .chain(BASE.iter())
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
        })
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.wifi_ssid, "studio");
        assert_eq!(config.wifi_password, "hunter22");
        assert_eq!(
            config.endpoint.destination,
            SocketAddrV4::new(Ipv4Addr::new(192, 168, 1, 20), 5000)
        );
        assert_eq!(config.endpoint.listen_port, 9000);
        assert_eq!(config.identity, DeviceIdentity(1));
        assert_eq!(config.haptic_effect, 1);
        assert!(!config.haptic_on_press);
        assert_eq!(config.event_payload, EventPayload::Counter);
        assert!(config.status_led);
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.debounce_ms, 200);
        assert_eq!(config.retry, RetryPolicy::new(3, 2_000));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8000"),
            ("LISTEN_PORT", "8001"),
            ("DEVICE_ID", "-3"),
            ("HAPTIC_EFFECT", "47"),
            ("HAPTIC_ON_PRESS", "yes"),
            ("EVENT_PAYLOAD", "none"),
            ("STATUS_LED", "OFF"),
        ])
        .unwrap();

        assert_eq!(config.endpoint.destination.port(), 8000);
        assert_eq!(config.endpoint.listen_port, 8001);
        assert_eq!(config.identity, DeviceIdentity(-3));
        assert_eq!(config.haptic_effect, 47);
        assert!(config.haptic_on_press);
        assert_eq!(config.event_payload, EventPayload::None);
        assert!(!config.status_led);
    }

    #[test]
    fn test_missing_required_keys() {
        fn only(
            pairs: &'static [(&'static str, &'static str)],
        ) -> Result<Config<'static>, ConfigError> {
            Config::from_lookup(|key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v))
        }

        assert_eq!(
            only(&[("WIFI_PASSWORD", "x"), ("PC_IP", "10.0.0.2")]),
            Err(ConfigError::Missing("WIFI_SSID"))
        );
        assert_eq!(
            only(&[("WIFI_SSID", "x"), ("PC_IP", "10.0.0.2")]),
            Err(ConfigError::Missing("WIFI_PASSWORD"))
        );
        assert_eq!(
            only(&[("WIFI_SSID", "x"), ("WIFI_PASSWORD", "y")]),
            Err(ConfigError::Missing("PC_IP"))
        );
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        assert_eq!(
            load(&[("WIFI_SSID", "  ")]),
            Err(ConfigError::Missing("WIFI_SSID"))
        );
        // Optional keys fall back to defaults
        assert_eq!(load(&[("PORT", "")]).unwrap().endpoint.destination.port(), 5000);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(load(&[("PC_IP", "pc.local")]), Err(ConfigError::Invalid("PC_IP")));
        assert_eq!(load(&[("PORT", "70000")]), Err(ConfigError::Invalid("PORT")));
        assert_eq!(load(&[("PORT", "0")]), Err(ConfigError::Invalid("PORT")));
        assert_eq!(
            load(&[("LISTEN_PORT", "abc")]),
            Err(ConfigError::Invalid("LISTEN_PORT"))
        );
        assert_eq!(load(&[("DEVICE_ID", "1.5")]), Err(ConfigError::Invalid("DEVICE_ID")));
        assert_eq!(
            load(&[("HAPTIC_EFFECT", "0")]),
            Err(ConfigError::Invalid("HAPTIC_EFFECT"))
        );
        assert_eq!(
            load(&[("HAPTIC_EFFECT", "124")]),
            Err(ConfigError::Invalid("HAPTIC_EFFECT"))
        );
        assert_eq!(
            load(&[("EVENT_PAYLOAD", "string")]),
            Err(ConfigError::Invalid("EVENT_PAYLOAD"))
        );
        assert_eq!(
            load(&[("STATUS_LED", "maybe")]),
            Err(ConfigError::Invalid("STATUS_LED"))
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConfigError::Missing("PC_IP").to_string(),
            "PC_IP is required"
        );
    }
}
