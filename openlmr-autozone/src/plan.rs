use core::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::AutoZoneError, frequency::resolve_frequencies, restriction::Restriction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum AutoZoneType {
    #[default]
    None = 0,
    /// International marine VHF.
    Marine = 1,
    AuUhfCb = 2,
    Gmrs = 3,
    Frs = 4,
    Murs = 5,
    Noaa = 6,
    Pmr446 = 7,
    UsRailway = 8,
}

impl AutoZoneType {
    /// Every band type with a band plan, in table order.
    pub const ALL: [AutoZoneType; 8] = [
        AutoZoneType::Marine,
        AutoZoneType::AuUhfCb,
        AutoZoneType::Gmrs,
        AutoZoneType::Frs,
        AutoZoneType::Murs,
        AutoZoneType::Noaa,
        AutoZoneType::Pmr446,
        AutoZoneType::UsRailway,
    ];

    pub fn from_u8(value: u8) -> Option<AutoZoneType> {
        match value {
            0 => Some(AutoZoneType::None),
            _ => AutoZoneType::ALL.get(usize::from(value) - 1).copied(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AutoZoneType::None => "none",
            AutoZoneType::Marine => "marine",
            AutoZoneType::AuUhfCb => "au-uhf-cb",
            AutoZoneType::Gmrs => "gmrs",
            AutoZoneType::Frs => "frs",
            AutoZoneType::Murs => "murs",
            AutoZoneType::Noaa => "noaa",
            AutoZoneType::Pmr446 => "pmr446",
            AutoZoneType::UsRailway => "us-railway",
        }
    }
}

impl fmt::Display for AutoZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AutoZoneType {
    type Err = AutoZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        core::iter::once(AutoZoneType::None)
            .chain(AutoZoneType::ALL)
            .find(|zone_type| zone_type.as_str().eq_ignore_ascii_case(s))
            .ok_or(AutoZoneError::NotFound)
    }
}

/// Named form of the band plan flag word. See [`AutoZoneFlags::from_bits`] for the packed layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AutoZoneFlags {
    pub enabled: bool,
    /// DMR rather than FM.
    pub digital: bool,
    /// A second bank sits half a channel step away from every base bank channel.
    pub interleave_channels: bool,
    pub duplex_enabled: bool,
    /// Offset banks transmit above the receive frequency. Unset is below.
    pub offset_direction_plus: bool,
    pub duplex_available: bool,
    pub narrow: bool,
    /// Channel numbers start at the plan's per-bank number starts instead of 1.
    pub has_base_index: bool,
    /// The interleaved bank starts half a step below the base bank instead of above it.
    pub interleaving_starts_prior: bool,
    /// With duplex off, offset banks use the shifted frequency for both rx and tx.
    pub simplex_uses_tx_frequency: bool,
    pub has_bank_at_offset: bool,
    /// Maximum transmit power in half watt steps. 0 means receive only.
    pub power_ceiling: u8,
}

impl AutoZoneFlags {
    pub const ENABLED: u16 = 0x01;
    pub const MODE_DIGITAL: u16 = 0x02;
    pub const INTERLEAVE_CHANNELS: u16 = 0x04;
    pub const DUPLEX_ENABLED: u16 = 0x08;
    pub const OFFSET_DIRECTION_PLUS: u16 = 0x10;
    pub const DUPLEX_AVAILABLE: u16 = 0x20;
    pub const NARROW: u16 = 0x40;
    pub const HAS_BASE_INDEX: u16 = 0x80;
    pub const INTERLEAVING_STARTS_PRIOR: u16 = 0x100;
    pub const SIMPLEX_USES_TX_FREQUENCY: u16 = 0x200;
    pub const HAS_BANK_AT_OFFSET: u16 = 0x400;
    pub const POWER_MASK: u16 = 0xf000;

    pub const NONE: AutoZoneFlags = AutoZoneFlags {
        enabled: false,
        digital: false,
        interleave_channels: false,
        duplex_enabled: false,
        offset_direction_plus: false,
        duplex_available: false,
        narrow: false,
        has_base_index: false,
        interleaving_starts_prior: false,
        simplex_uses_tx_frequency: false,
        has_bank_at_offset: false,
        power_ceiling: 0,
    };

    pub const fn from_bits(bits: u16) -> AutoZoneFlags {
        AutoZoneFlags {
            enabled: bits & Self::ENABLED != 0,
            digital: bits & Self::MODE_DIGITAL != 0,
            interleave_channels: bits & Self::INTERLEAVE_CHANNELS != 0,
            duplex_enabled: bits & Self::DUPLEX_ENABLED != 0,
            offset_direction_plus: bits & Self::OFFSET_DIRECTION_PLUS != 0,
            duplex_available: bits & Self::DUPLEX_AVAILABLE != 0,
            narrow: bits & Self::NARROW != 0,
            has_base_index: bits & Self::HAS_BASE_INDEX != 0,
            interleaving_starts_prior: bits & Self::INTERLEAVING_STARTS_PRIOR != 0,
            simplex_uses_tx_frequency: bits & Self::SIMPLEX_USES_TX_FREQUENCY != 0,
            has_bank_at_offset: bits & Self::HAS_BANK_AT_OFFSET != 0,
            power_ceiling: ((bits & Self::POWER_MASK) >> 12) as u8,
        }
    }

    pub const fn bits(&self) -> u16 {
        let mut bits = ((self.power_ceiling as u16) << 12) & Self::POWER_MASK;
        let named = [
            (self.enabled, Self::ENABLED),
            (self.digital, Self::MODE_DIGITAL),
            (self.interleave_channels, Self::INTERLEAVE_CHANNELS),
            (self.duplex_enabled, Self::DUPLEX_ENABLED),
            (self.offset_direction_plus, Self::OFFSET_DIRECTION_PLUS),
            (self.duplex_available, Self::DUPLEX_AVAILABLE),
            (self.narrow, Self::NARROW),
            (self.has_base_index, Self::HAS_BASE_INDEX),
            (self.interleaving_starts_prior, Self::INTERLEAVING_STARTS_PRIOR),
            (self.simplex_uses_tx_frequency, Self::SIMPLEX_USES_TX_FREQUENCY),
            (self.has_bank_at_offset, Self::HAS_BANK_AT_OFFSET),
        ];
        let mut i = 0;
        while i < named.len() {
            if named[i].0 {
                bits |= named[i].1;
            }
            i += 1;
        }
        bits
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bank {
    Base,
    Interleaved,
    OffsetBase,
    OffsetInterleaved,
}

impl Bank {
    /// Flat index order of the banks. Disabled banks are skipped.
    pub const ORDER: [Bank; 4] = [
        Bank::Base,
        Bank::Interleaved,
        Bank::OffsetBase,
        Bank::OffsetInterleaved,
    ];

    pub fn is_interleaved(&self) -> bool {
        matches!(self, Bank::Interleaved | Bank::OffsetInterleaved)
    }

    pub fn is_offset(&self) -> bool {
        matches!(self, Bank::OffsetBase | Bank::OffsetInterleaved)
    }

    /// Appended to generated channel names.
    pub fn suffix(&self) -> &'static str {
        if self.is_offset() {
            "R"
        } else {
            ""
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandPlan {
    pub zone_type: AutoZoneType,
    pub name: &'static str,
    pub flags: AutoZoneFlags,
    /// First channel of the base bank, in hertz.
    pub start_frequency: u32,
    /// Last non-interleaved channel of the base bank, in hertz.
    pub end_frequency: u32,
    pub channel_spacing: u32,
    pub repeater_offset: u32,
    pub priority_channel_index: u8,
    pub total_channels_in_base_bank: u8,
    // Display numbering for each bank, used when `has_base_index` is set.
    pub base_channel_number_start: u16,
    pub interleave_channel_number_start: u16,
    pub offset_bank_channel_number_start: u16,
    pub offset_bank_interleaved_channel_number_start: u16,
    pub restriction: Option<Restriction>,
}

impl BandPlan {
    pub const EMPTY: BandPlan = BandPlan {
        zone_type: AutoZoneType::None,
        name: "",
        flags: AutoZoneFlags::NONE,
        start_frequency: 0,
        end_frequency: 0,
        channel_spacing: 0,
        repeater_offset: 0,
        priority_channel_index: 0,
        total_channels_in_base_bank: 0,
        base_channel_number_start: 1,
        interleave_channel_number_start: 1,
        offset_bank_channel_number_start: 1,
        offset_bank_interleaved_channel_number_start: 1,
        restriction: None,
    };

    pub fn is_bank_enabled(&self, bank: Bank) -> bool {
        let flags = &self.flags;
        if !flags.enabled {
            return false;
        }
        match bank {
            Bank::Base => true,
            Bank::Interleaved => flags.interleave_channels,
            Bank::OffsetBase => flags.has_bank_at_offset,
            Bank::OffsetInterleaved => flags.has_bank_at_offset && flags.interleave_channels,
        }
    }

    pub fn enabled_banks(&self) -> impl Iterator<Item = Bank> + '_ {
        Bank::ORDER
            .into_iter()
            .filter(move |bank| self.is_bank_enabled(*bank))
    }

    pub fn enabled_bank_count(&self) -> u16 {
        self.enabled_banks().count() as u16
    }

    /// Number of virtual channels across every enabled bank.
    pub fn total_channels(&self) -> u16 {
        u16::from(self.total_channels_in_base_bank) * self.enabled_bank_count()
    }

    pub fn number_start(&self, bank: Bank) -> u16 {
        match bank {
            Bank::Base => self.base_channel_number_start,
            Bank::Interleaved => self.interleave_channel_number_start,
            Bank::OffsetBase => self.offset_bank_channel_number_start,
            Bank::OffsetInterleaved => self.offset_bank_interleaved_channel_number_start,
        }
    }

    /// Highest base bank position whose grid frequency stays within `end_frequency`.
    pub fn last_grid_position(&self) -> u16 {
        let last = u16::from(self.total_channels_in_base_bank).saturating_sub(1);
        if self.channel_spacing == 0 || self.end_frequency < self.start_frequency {
            return last;
        }
        let fits = (self.end_frequency - self.start_frequency) / self.channel_spacing;
        last.min(fits.min(u32::from(u16::MAX)) as u16)
    }

    /// Checks the invariants every compiled-in band plan must hold.
    pub fn validate(&self) -> Result<(), AutoZoneError> {
        let flags = &self.flags;
        let n = u32::from(self.total_channels_in_base_bank);
        let consistent = self.start_frequency <= self.end_frequency
            && n >= 1
            && (!flags.has_bank_at_offset || flags.duplex_enabled)
            && self.priority_channel_index < self.total_channels_in_base_bank
            && flags.power_ceiling <= 0x0f;
        if !consistent {
            return Err(AutoZoneError::InvalidPlan);
        }

        let last = (n - 1)
            .checked_mul(self.channel_spacing)
            .and_then(|span| self.start_frequency.checked_add(span))
            .ok_or(AutoZoneError::InvalidPlan)?;
        if last > self.end_frequency {
            return Err(AutoZoneError::InvalidPlan);
        }

        if flags.interleave_channels && self.channel_spacing < 2 {
            return Err(AutoZoneError::InvalidPlan);
        }

        // Frequencies move monotonically with position, so a bank that resolves at both ends
        // resolves everywhere. Disabled plans are checked as if they were turned on.
        let as_enabled = BandPlan {
            flags: AutoZoneFlags {
                enabled: true,
                ..*flags
            },
            ..*self
        };
        let last_position = u16::from(self.total_channels_in_base_bank) - 1;
        for bank in as_enabled.enabled_banks() {
            for position in [0, last_position] {
                resolve_frequencies(&as_enabled, bank, position)?;
            }
        }

        Ok(())
    }
}
