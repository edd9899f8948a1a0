#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use channel::LmrChannel;
use serde::{Deserialize, Serialize};
use zone::LmrZone;

pub mod channel;
pub mod zone;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LmrCodeplug {
    pub channels: Vec<LmrChannel>,

    #[serde(default)]
    pub zones: Vec<LmrZone>,
}

impl LmrCodeplug {
    pub fn channel(&self, num: u16) -> Option<&LmrChannel> {
        self.channels.iter().find(|channel| channel.num == Some(num))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codeplug_toml() {
        let codeplug: LmrCodeplug = toml::from_str(
            r#"
            [[channels]]
            num = 3
            freq = 146520000
            name = "Calling"

            [[channels]]
            freq = 162550000
            name = "WX7"
            rxonly = true
            bandwidth = "narrow"

            [[zones]]
            name = "Simplex"
            channels = [3]
            "#,
        )
        .unwrap();

        assert_eq!(codeplug.channels.len(), 2);
        assert_eq!(codeplug.channel(3).unwrap().name, "Calling");
        assert!(!codeplug.channel(3).unwrap().rxonly);
        assert!(codeplug.channels[1].rxonly);
        assert_eq!(codeplug.zones[0].channel_count(), 1);
    }
}
