//! Maps inbound addresses to commands.

use osc_proto::ADDR_HAPTIC_PLAY;

/// A recognized inbound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Play the configured haptic effect.
    HapticPlay,
}

impl Command {
    /// Look up the command for an address.
    #[must_use]
    pub fn from_address(address: &str) -> Option<Self> {
        match address {
            ADDR_HAPTIC_PLAY => Some(Self::HapticPlay),
            _ => None,
        }
    }

    /// The address this command is received on.
    #[must_use]
    pub const fn address(self) -> &'static str {
        match self {
            Self::HapticPlay => ADDR_HAPTIC_PLAY,
        }
    }
}

/// Outcome of dispatching one inbound address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// The address maps to a command to execute.
    Action(Command),
    /// Unknown address; nothing to do.
    Ignored,
}

/// Decide what to do with an inbound address.
///
/// Unknown addresses are logged and ignored, never treated as errors.
#[must_use]
pub fn dispatch(address: &str) -> Dispatch {
    match Command::from_address(address) {
        Some(command) => {
            debug!("command {}", address);
            Dispatch::Action(command)
        }
        None => {
            info!("ignoring unknown address {}", address);
            Dispatch::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haptic_play_is_recognized() {
        assert_eq!(dispatch("/haptic/play"), Dispatch::Action(Command::HapticPlay));
    }

    #[test]
    fn test_unknown_addresses_are_ignored() {
        assert_eq!(dispatch("/haptic/stop"), Dispatch::Ignored);
        assert_eq!(dispatch("/haptic/play/"), Dispatch::Ignored);
        assert_eq!(dispatch(""), Dispatch::Ignored);
    }

    #[test]
    fn test_command_address_round_trip() {
        let command = Command::HapticPlay;
        assert_eq!(Command::from_address(command.address()), Some(command));
    }
}
