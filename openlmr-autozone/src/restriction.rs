use openlmr_codeplug::channel::{LmrChannel, PowerLimit};

use crate::{
    mapper::{map_index, MappedIndex},
    plan::{BandPlan, Bank},
};

/// Band specific transmit limits applied to a generated channel after its frequencies, mode and
/// power ceiling are filled in. Each band plan carries at most one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Restriction {
    Marine,
    AuUhfCb,
    Gmrs,
    Frs,
}

impl Restriction {
    pub fn apply(&self, plan: &BandPlan, index: u16, channel: &mut LmrChannel) {
        let Ok(mapped) = map_index(plan, index) else {
            return;
        };
        match self {
            Restriction::Marine => marine(&mapped, channel),
            Restriction::AuUhfCb => au_uhf_cb(&mapped, channel),
            Restriction::Gmrs => gmrs(plan, &mapped, channel),
            Restriction::Frs => frs(plan, &mapped, channel),
        }
    }
}

/// Runs the plan's restriction hook, if it has one.
pub fn apply_restrictions(plan: &BandPlan, index: u16, channel: &mut LmrChannel) {
    if let Some(restriction) = &plan.restriction {
        restriction.apply(plan, index, channel);
    }
}

pub(crate) fn receive_only(channel: &mut LmrChannel) {
    channel.rxonly = true;
    channel.power_limit = None;
}

pub(crate) fn limit_power(channel: &mut LmrChannel, limit: PowerLimit) {
    if channel.rxonly {
        return;
    }
    channel.power_limit = Some(match channel.power_limit {
        Some(current) => current.min(limit),
        None => limit,
    });
}

fn marine(mapped: &MappedIndex, channel: &mut LmrChannel) {
    match mapped.channel_number {
        // Port operations and ship movement, low power only.
        15 | 17 | 75 | 76 => limit_power(channel, PowerLimit::ONE_WATT),
        // DSC.
        70 => receive_only(channel),
        _ => {}
    }
}

fn au_uhf_cb(mapped: &MappedIndex, channel: &mut LmrChannel) {
    let number = mapped.channel_number;
    // 22 and 23 carry telemetry, 61 to 63 are reserved.
    if matches!(number, 22 | 23 | 61..=63) {
        receive_only(channel);
        return;
    }
    // Repeater inputs only exist for 1 to 8 and 41 to 48.
    if mapped.bank.is_offset() && !matches!(number, 1..=8 | 41..=48) {
        receive_only(channel);
    }
}

fn gmrs(plan: &BandPlan, mapped: &MappedIndex, channel: &mut LmrChannel) {
    match mapped.bank {
        // The interleaved grid runs one slot past GMRS channel 7.
        Bank::Interleaved if past_last_interleaved(plan, mapped) => receive_only(channel),
        // Repeaters only pair with the base bank channels.
        Bank::OffsetInterleaved => receive_only(channel),
        _ => {}
    }
}

fn frs(plan: &BandPlan, mapped: &MappedIndex, channel: &mut LmrChannel) {
    if mapped.bank == Bank::Interleaved && past_last_interleaved(plan, mapped) {
        receive_only(channel);
    }
}

fn past_last_interleaved(plan: &BandPlan, mapped: &MappedIndex) -> bool {
    mapped.position + 1 >= u16::from(plan.total_channels_in_base_bank)
}
