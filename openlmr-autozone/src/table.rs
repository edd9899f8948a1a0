use crate::{
    error::AutoZoneError,
    plan::{AutoZoneFlags, AutoZoneType, BandPlan},
    restriction::Restriction,
};

/// Compiled-in band plans, one per [`AutoZoneType`] other than `None`, in discriminant order.
pub static BAND_PLANS: [BandPlan; 8] = [
    BandPlan {
        zone_type: AutoZoneType::Marine,
        name: "Marine",
        flags: AutoZoneFlags {
            enabled: true,
            interleave_channels: true,
            duplex_available: true,
            has_base_index: true,
            interleaving_starts_prior: true,
            power_ceiling: 10,
            ..AutoZoneFlags::NONE
        },
        // Channels 01 to 28, with 60 to 87 interleaved below them.
        start_frequency: 156_050_000,
        end_frequency: 157_400_000,
        channel_spacing: 50_000,
        repeater_offset: 4_600_000,
        // Channel 16.
        priority_channel_index: 15,
        total_channels_in_base_bank: 28,
        base_channel_number_start: 1,
        interleave_channel_number_start: 60,
        offset_bank_channel_number_start: 1,
        offset_bank_interleaved_channel_number_start: 60,
        restriction: Some(Restriction::Marine),
    },
    BandPlan {
        zone_type: AutoZoneType::AuUhfCb,
        name: "UHF CB",
        flags: AutoZoneFlags {
            enabled: true,
            interleave_channels: true,
            duplex_enabled: true,
            offset_direction_plus: true,
            duplex_available: true,
            narrow: true,
            has_base_index: true,
            has_bank_at_offset: true,
            power_ceiling: 10,
            ..AutoZoneFlags::NONE
        },
        start_frequency: 476_425_000,
        end_frequency: 477_400_000,
        channel_spacing: 25_000,
        repeater_offset: 750_000,
        // Channel 5, emergency.
        priority_channel_index: 4,
        total_channels_in_base_bank: 40,
        base_channel_number_start: 1,
        interleave_channel_number_start: 41,
        offset_bank_channel_number_start: 1,
        offset_bank_interleaved_channel_number_start: 41,
        restriction: Some(Restriction::AuUhfCb),
    },
    BandPlan {
        zone_type: AutoZoneType::Gmrs,
        name: "GMRS",
        flags: AutoZoneFlags {
            enabled: true,
            interleave_channels: true,
            duplex_enabled: true,
            offset_direction_plus: true,
            duplex_available: true,
            has_base_index: true,
            has_bank_at_offset: true,
            power_ceiling: 10,
            ..AutoZoneFlags::NONE
        },
        // Channels 15 to 22, with 1 to 7 interleaved above them.
        start_frequency: 462_550_000,
        end_frequency: 462_725_000,
        channel_spacing: 25_000,
        repeater_offset: 5_000_000,
        // Channel 20.
        priority_channel_index: 5,
        total_channels_in_base_bank: 8,
        base_channel_number_start: 15,
        interleave_channel_number_start: 1,
        offset_bank_channel_number_start: 15,
        offset_bank_interleaved_channel_number_start: 1,
        restriction: Some(Restriction::Gmrs),
    },
    BandPlan {
        zone_type: AutoZoneType::Frs,
        name: "FRS",
        flags: AutoZoneFlags {
            enabled: true,
            interleave_channels: true,
            narrow: true,
            has_base_index: true,
            power_ceiling: 4,
            ..AutoZoneFlags::NONE
        },
        start_frequency: 462_550_000,
        end_frequency: 462_725_000,
        channel_spacing: 25_000,
        repeater_offset: 0,
        priority_channel_index: 0,
        total_channels_in_base_bank: 8,
        base_channel_number_start: 15,
        interleave_channel_number_start: 1,
        offset_bank_channel_number_start: 15,
        offset_bank_interleaved_channel_number_start: 1,
        restriction: Some(Restriction::Frs),
    },
    BandPlan {
        zone_type: AutoZoneType::Murs,
        name: "MURS",
        flags: AutoZoneFlags {
            enabled: true,
            narrow: true,
            power_ceiling: 4,
            ..AutoZoneFlags::NONE
        },
        start_frequency: 151_820_000,
        end_frequency: 151_940_000,
        channel_spacing: 60_000,
        repeater_offset: 0,
        priority_channel_index: 0,
        total_channels_in_base_bank: 3,
        base_channel_number_start: 1,
        interleave_channel_number_start: 1,
        offset_bank_channel_number_start: 1,
        offset_bank_interleaved_channel_number_start: 1,
        restriction: None,
    },
    BandPlan {
        zone_type: AutoZoneType::Noaa,
        name: "NOAA",
        flags: AutoZoneFlags {
            enabled: true,
            power_ceiling: 0,
            ..AutoZoneFlags::NONE
        },
        start_frequency: 162_400_000,
        end_frequency: 162_550_000,
        channel_spacing: 25_000,
        repeater_offset: 0,
        priority_channel_index: 0,
        total_channels_in_base_bank: 7,
        base_channel_number_start: 1,
        interleave_channel_number_start: 1,
        offset_bank_channel_number_start: 1,
        offset_bank_interleaved_channel_number_start: 1,
        restriction: None,
    },
    BandPlan {
        zone_type: AutoZoneType::Pmr446,
        name: "PMR446",
        flags: AutoZoneFlags {
            enabled: true,
            narrow: true,
            power_ceiling: 1,
            ..AutoZoneFlags::NONE
        },
        start_frequency: 446_006_250,
        end_frequency: 446_193_750,
        channel_spacing: 12_500,
        repeater_offset: 0,
        priority_channel_index: 0,
        total_channels_in_base_bank: 16,
        base_channel_number_start: 1,
        interleave_channel_number_start: 1,
        offset_bank_channel_number_start: 1,
        offset_bank_interleaved_channel_number_start: 1,
        restriction: None,
    },
    // Listen only and off unless a build turns it on.
    BandPlan {
        zone_type: AutoZoneType::UsRailway,
        name: "Railway",
        flags: AutoZoneFlags {
            enabled: false,
            narrow: true,
            has_base_index: true,
            power_ceiling: 0,
            ..AutoZoneFlags::NONE
        },
        start_frequency: 160_110_000,
        end_frequency: 161_550_000,
        channel_spacing: 15_000,
        repeater_offset: 0,
        priority_channel_index: 0,
        total_channels_in_base_bank: 97,
        base_channel_number_start: 7,
        interleave_channel_number_start: 7,
        offset_bank_channel_number_start: 7,
        offset_bank_interleaved_channel_number_start: 7,
        restriction: None,
    },
];

pub fn lookup(zone_type: AutoZoneType) -> Result<&'static BandPlan, AutoZoneError> {
    BAND_PLANS
        .iter()
        .find(|plan| plan.zone_type == zone_type)
        .ok_or(AutoZoneError::NotFound)
}

/// Band plans that can be offered as virtual zones, in table order.
pub fn enabled_plans() -> impl Iterator<Item = &'static BandPlan> {
    BAND_PLANS.iter().filter(|plan| plan.flags.enabled)
}

pub fn count_enabled() -> u8 {
    enabled_plans().count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_plan_is_consistent() {
        for plan in &BAND_PLANS {
            assert_eq!(plan.validate(), Ok(()), "{}", plan.name);
        }
    }

    #[test]
    fn table_follows_type_order() {
        let types = BAND_PLANS.map(|plan| plan.zone_type);
        assert_eq!(types, AutoZoneType::ALL);
        for zone_type in AutoZoneType::ALL {
            assert_eq!(lookup(zone_type).unwrap().zone_type, zone_type);
        }
        assert_eq!(lookup(AutoZoneType::None), Err(AutoZoneError::NotFound));
    }

    #[test]
    fn railway_is_disabled() {
        assert_eq!(count_enabled(), 7);
        assert!(enabled_plans().all(|plan| plan.zone_type != AutoZoneType::UsRailway));
    }
}
