use alloc::string::String;
use sequential_storage::map::StorageItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LmrMode {
    /// Frequency modulated voice. This does not imply any particular bandwidth.
    #[default]
    FM,
    /// DMR.
    DMR,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum LmrBandwidth {
    /// 12.5kHz.
    Narrow,
    /// 25kHz.
    #[default]
    Wide,
}

/// Transmit power ceiling in half watt steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerLimit(pub u8);

impl PowerLimit {
    pub const HALF_WATT: PowerLimit = PowerLimit(1);
    pub const ONE_WATT: PowerLimit = PowerLimit(2);

    pub fn milliwatts(&self) -> u32 {
        u32::from(self.0) * 500
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LmrChannel {
    pub num: Option<u16>,
    /// Receive frequency in hertz.
    pub freq: u32,
    /// Transmit frequency in hertz, `None` for simplex.
    #[serde(default)]
    pub tx_freq: Option<u32>,
    pub name: String,

    #[serde(default = "default_false")]
    pub rxonly: bool,

    #[serde(default)]
    pub mode: LmrMode,
    #[serde(default)]
    pub bandwidth: LmrBandwidth,
    #[serde(default)]
    pub power_limit: Option<PowerLimit>,
}

fn default_false() -> bool {
    false
}

impl Default for LmrChannel {
    fn default() -> Self {
        LmrChannel {
            num: None,
            freq: 0,
            tx_freq: None,
            name: String::new(),
            rxonly: false,
            mode: LmrMode::FM,
            bandwidth: LmrBandwidth::Wide,
            power_limit: None,
        }
    }
}

impl LmrChannel {
    pub fn transmit_freq(&self) -> u32 {
        self.tx_freq.unwrap_or(self.freq)
    }

    pub fn is_duplex(&self) -> bool {
        self.transmit_freq() != self.freq
    }
}

impl StorageItem for LmrChannel {
    type Key = u16;

    type Error = ();

    fn serialize_into(&self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        if self.num.is_none() || !valid_freq(self.freq) || !valid_freq(self.transmit_freq()) {
            return Err(());
        }
        if let Ok(used) = postcard::to_slice(self, buffer) {
            return Ok(used.len());
        } else {
            return Err(());
        }
    }

    fn deserialize_from(buffer: &[u8]) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        postcard::from_bytes(buffer).map_err(|_| ())
    }

    fn key(&self) -> Self::Key {
        // Unnumbered channels are rejected by serialize_into before they reach the map.
        self.num.unwrap_or(u16::MAX)
    }
}

fn valid_freq(freq: u32) -> bool {
    freq > 100_000_000 && freq < 1_000_000_000
}
