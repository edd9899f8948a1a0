use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use openlmr_autozone::{table::enabled_plans, AutoZoneType};
use openlmr_codeplug::LmrCodeplug;
use serde::Deserialize;

/// Codeplug TOML plus the autozones the radio offers after the stored zones.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramConfig {
    #[serde(flatten)]
    pub codeplug: LmrCodeplug,

    #[serde(default = "default_autozones")]
    pub autozones: Vec<AutoZoneType>,
}

fn default_autozones() -> Vec<AutoZoneType> {
    enabled_plans().map(|plan| plan.zone_type).collect()
}

impl ProgramConfig {
    pub fn load(path: &Path) -> Result<ProgramConfig> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        ProgramConfig::parse(&config_str)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn parse(config_str: &str) -> Result<ProgramConfig> {
        let mut config: ProgramConfig = toml::from_str(config_str)?;
        config.number_channels()?;
        Ok(config)
    }

    /// Gives unnumbered channels the next free number. Explicit numbers must not go backwards.
    fn number_channels(&mut self) -> Result<()> {
        let mut channel_num = 0u16;
        for channel in &mut self.codeplug.channels {
            match channel.num {
                Some(requested_num) => {
                    if requested_num < channel_num {
                        bail!(
                            "channel {} ({}) is numbered below the channel before it",
                            requested_num,
                            channel.name
                        );
                    }
                    channel_num = requested_num;
                }
                None => channel.num = Some(channel_num),
            }
            channel_num = channel_num
                .checked_add(1)
                .context("too many channels in codeplug")?;
        }
        Ok(())
    }

    /// Zone list slots: the stored zones, then one virtual zone per configured autozone.
    pub fn zone_slots(&self) -> Vec<AutoZoneType> {
        std::iter::repeat(AutoZoneType::None)
            .take(self.codeplug.zones.len())
            .chain(self.autozones.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        autozones = ["au-uhf-cb", "noaa"]

        [[channels]]
        freq = 146520000
        name = "Calling"

        [[channels]]
        num = 10
        freq = 147000000
        name = "Repeater"

        [[channels]]
        freq = 147060000
        name = "Repeater 2"

        [[zones]]
        name = "Local"
        channels = [0, 10, 11]
    "#;

    #[test]
    fn numbers_channels_in_order() {
        let config = ProgramConfig::parse(CONFIG).unwrap();
        let nums: Vec<_> = config.codeplug.channels.iter().map(|c| c.num).collect();
        assert_eq!(nums, [Some(0), Some(10), Some(11)]);
    }

    #[test]
    fn autozones_follow_stored_zones() {
        let config = ProgramConfig::parse(CONFIG).unwrap();
        assert_eq!(
            config.zone_slots(),
            [AutoZoneType::None, AutoZoneType::AuUhfCb, AutoZoneType::Noaa]
        );
    }

    #[test]
    fn defaults_to_every_enabled_autozone() {
        let config = ProgramConfig::parse("channels = []").unwrap();
        assert_eq!(config.autozones.len(), 7);
        assert_eq!(config.autozones[0], AutoZoneType::Marine);
    }

    #[test]
    fn rejects_channel_numbers_going_backwards() {
        let config = r#"
            [[channels]]
            num = 5
            freq = 146520000
            name = "A"

            [[channels]]
            num = 2
            freq = 146540000
            name = "B"
        "#;
        assert!(ProgramConfig::parse(config).is_err());
    }
}
