use core::fmt::Write;

use openlmr_codeplug::{
    channel::{LmrBandwidth, LmrChannel, LmrMode, PowerLimit},
    zone::LmrZone,
};

use crate::{
    error::AutoZoneError,
    frequency::{resolve_frequencies, Frequencies},
    mapper::{map_index, MappedIndex},
    plan::{AutoZoneType, BandPlan},
    restriction::{apply_restrictions, receive_only},
    state::{ActiveZone, ZoneSlots},
    table::lookup,
};

impl ActiveZone {
    /// Generates the channel at `index` of the active band into `channel`. On error `channel` is
    /// left as it was.
    pub fn try_channel_data(
        &self,
        index: u16,
        channel: &mut LmrChannel,
    ) -> Result<(), AutoZoneError> {
        let plan = self.active_plan()?;
        let mapped = mapped_index(plan, index)?;
        let freqs = resolve_or_clamp(plan, &mapped)?;

        fill_channel(plan, &mapped, freqs, channel);
        apply_restrictions(plan, index, channel);
        Ok(())
    }

    pub fn get_channel_data(&self, index: u16, channel: &mut LmrChannel) -> bool {
        self.try_channel_data(index, channel).is_ok()
    }

    /// Frequencies of the channel at `index` without building the whole channel.
    pub fn try_frequencies_for_index(&self, index: u16) -> Result<Frequencies, AutoZoneError> {
        let plan = self.active_plan()?;
        let mapped = mapped_index(plan, index)?;
        resolve_or_clamp(plan, &mapped)
    }

    pub fn get_frequencies_for_index(&self, index: u16, rx: &mut u32, tx: &mut u32) -> bool {
        match self.try_frequencies_for_index(index) {
            Ok(freqs) => {
                *rx = freqs.rx;
                *tx = freqs.tx;
                true
            }
            Err(_) => false,
        }
    }

    /// Applies the active band's restrictions to a channel produced elsewhere.
    pub fn apply_channel_restrictions(&self, index: u16, channel: &mut LmrChannel) {
        if let Ok(plan) = self.plan() {
            apply_restrictions(plan, index, channel);
        }
    }

    fn active_plan(&self) -> Result<&'static BandPlan, AutoZoneError> {
        self.plan().map_err(|err| {
            debug!("autozone query with no valid band: {}", self.zone_type().as_str());
            err
        })
    }
}

/// Summary of the virtual zone in `zone_num`, whichever band is active.
pub fn try_zone_data<S: ZoneSlots + ?Sized>(
    slots: &S,
    zone_num: usize,
) -> Result<LmrZone, AutoZoneError> {
    let zone_type = slots.zone_type(zone_num).ok_or(AutoZoneError::NotFound)?;
    let plan = lookup(zone_type)?;
    if !plan.flags.enabled {
        return Err(AutoZoneError::NotFound);
    }
    let mut zone = LmrZone::default();
    fill_zone(plan, &mut zone);
    Ok(zone)
}

pub fn get_zone_data_for_index<S: ZoneSlots + ?Sized>(
    slots: &S,
    zone_num: usize,
    zone: &mut LmrZone,
) -> bool {
    let Some(plan) = slots
        .zone_type(zone_num)
        .and_then(|zone_type| lookup(zone_type).ok())
        .filter(|plan| plan.flags.enabled)
    else {
        return false;
    };
    fill_zone(plan, zone);
    true
}

/// Copies a band plan out verbatim, enabled or not.
pub fn get_data(zone_type: AutoZoneType, params: &mut BandPlan) -> bool {
    match lookup(zone_type) {
        Ok(plan) => {
            *params = *plan;
            true
        }
        Err(_) => false,
    }
}

fn mapped_index(plan: &BandPlan, index: u16) -> Result<MappedIndex, AutoZoneError> {
    map_index(plan, index).map_err(|err| {
        trace!("{} has no channel at index {}", plan.name, index);
        err
    })
}

// A grid past end_frequency is a defect in the compiled-in table rather than something a caller
// can recover from. Release builds fall back to the last grid position that fits. A shift that
// leaves u32 has no such fallback: the retry fails the same way and the channel doesn't exist.
fn resolve_or_clamp(plan: &BandPlan, mapped: &MappedIndex) -> Result<Frequencies, AutoZoneError> {
    match resolve_frequencies(plan, mapped.bank, mapped.position) {
        Err(AutoZoneError::InvalidPlan) => {
            error!(
                "{} runs past its end frequency at position {}",
                plan.name, mapped.position
            );
            debug_assert!(false, "band plan runs past its end frequency");
            resolve_frequencies(plan, mapped.bank, plan.last_grid_position())
        }
        resolved => resolved,
    }
}

fn fill_channel(
    plan: &BandPlan,
    mapped: &MappedIndex,
    freqs: Frequencies,
    channel: &mut LmrChannel,
) {
    channel.num = Some(mapped.channel_number);
    channel.freq = freqs.rx;
    channel.tx_freq = freqs.is_duplex().then_some(freqs.tx);
    channel.name.clear();
    // Writing to a String can't fail.
    let _ = write!(
        channel.name,
        "{} {}{}",
        plan.name,
        mapped.channel_number,
        mapped.bank.suffix()
    );
    channel.mode = if plan.flags.digital {
        LmrMode::DMR
    } else {
        LmrMode::FM
    };
    channel.bandwidth = if plan.flags.narrow {
        LmrBandwidth::Narrow
    } else {
        LmrBandwidth::Wide
    };
    channel.rxonly = false;
    channel.power_limit = Some(PowerLimit(plan.flags.power_ceiling));
    if plan.flags.power_ceiling == 0 {
        receive_only(channel);
    }
}

fn fill_zone(plan: &BandPlan, zone: &mut LmrZone) {
    zone.name.clear();
    zone.name.push_str(plan.name);
    zone.channels.clear();
    zone.autozone = true;
    zone.num_channels = plan.total_channels();
    zone.priority_channel = Some(u16::from(plan.priority_channel_index));
}
