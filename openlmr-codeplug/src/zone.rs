use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// Logical grouping of channels. Stored zones list their channel numbers, virtual zones only
/// carry a count since their channels are generated on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LmrZone {
    pub name: String,

    #[serde(default)]
    pub channels: Vec<u16>,

    /// Index of the zone's priority channel, if it has one.
    #[serde(default)]
    pub priority_channel: Option<u16>,

    #[serde(skip)]
    pub autozone: bool,
    #[serde(skip)]
    pub num_channels: u16,
}

impl LmrZone {
    pub fn channel_count(&self) -> u16 {
        if self.autozone {
            self.num_channels
        } else {
            self.channels.len() as u16
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    #[test]
    fn channel_count_for_stored_and_virtual_zones() {
        let stored = LmrZone {
            name: "Local".to_string(),
            channels: vec![1, 2, 5],
            ..Default::default()
        };
        assert_eq!(stored.channel_count(), 3);

        let generated = LmrZone {
            name: "UHF CB".to_string(),
            autozone: true,
            num_channels: 160,
            ..Default::default()
        };
        assert_eq!(generated.channel_count(), 160);
    }
}
