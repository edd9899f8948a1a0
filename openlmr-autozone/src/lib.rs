//! Virtual zones whose channels are generated on demand from a small band plan instead of being
//! stored in the codeplug. The Australian UHF CB band alone would otherwise take 80 stored
//! channels.
//!
//! Flat channel indices are 0-based and run across every enabled bank of the active band. Zone
//! numbers are slots in the radio's zone list, mapped to band types through [`ZoneSlots`].

#![no_std]

extern crate alloc;

mod fmt;

pub mod error;
pub mod frequency;
pub mod mapper;
pub mod materialize;
pub mod plan;
pub mod restriction;
pub mod state;
pub mod table;

use openlmr_codeplug::{channel::LmrChannel, zone::LmrZone};

pub use error::AutoZoneError;
pub use frequency::{resolve_frequencies, Frequencies};
pub use mapper::{channels, index_for_channel_number, map_index, MappedIndex};
pub use materialize::{get_data, get_zone_data_for_index, try_zone_data};
pub use plan::{AutoZoneFlags, AutoZoneType, BandPlan, Bank};
pub use restriction::{apply_restrictions, Restriction};
pub use state::{
    active_zone, initialize, is_current_zone, is_valid, ActiveZone, AutoZoneSlots, ZoneSlots,
};
pub use table::{count_enabled, lookup, BAND_PLANS};

pub fn get_channel_data(index: u16, channel: &mut LmrChannel) -> bool {
    active_zone().get_channel_data(index, channel)
}

pub fn get_frequencies_for_index(index: u16, rx: &mut u32, tx: &mut u32) -> bool {
    active_zone().get_frequencies_for_index(index, rx, tx)
}

pub fn apply_channel_restrictions(index: u16, channel: &mut LmrChannel) {
    active_zone().apply_channel_restrictions(index, channel)
}

/// Summary of the active band as a zone, for callers that don't track zone slots.
pub fn active_zone_data(zone: &mut LmrZone) -> bool {
    match active_zone().plan() {
        Ok(plan) => get_zone_data_for_index(&[plan.zone_type][..], 0, zone),
        Err(_) => false,
    }
}
