use core::sync::atomic::{AtomicU8, Ordering};

use crate::{
    error::AutoZoneError,
    plan::{AutoZoneType, BandPlan},
    table::{enabled_plans, lookup},
};

/// Which band, if any, the generator is serving channels for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActiveZone {
    zone_type: AutoZoneType,
}

impl ActiveZone {
    pub const fn new() -> ActiveZone {
        ActiveZone {
            zone_type: AutoZoneType::None,
        }
    }

    /// Selects a band. Unknown and disabled bands are accepted but leave the zone invalid.
    pub fn initialize(&mut self, zone_type: AutoZoneType) {
        self.zone_type = zone_type;
    }

    pub fn zone_type(&self) -> AutoZoneType {
        self.zone_type
    }

    pub fn is_valid(&self) -> bool {
        self.plan().is_ok()
    }

    /// The active band's plan, as long as it exists and is enabled.
    pub fn plan(&self) -> Result<&'static BandPlan, AutoZoneError> {
        match lookup(self.zone_type) {
            Ok(plan) if plan.flags.enabled => Ok(plan),
            _ => Err(AutoZoneError::NoActiveBand),
        }
    }

    pub fn is_current_zone<S: ZoneSlots + ?Sized>(&self, slots: &S, zone_index: usize) -> bool {
        self.is_valid() && slots.zone_type(zone_index) == Some(self.zone_type)
    }
}

/// Maps the zone list's slot numbers onto band types. The zone list owns this mapping.
pub trait ZoneSlots {
    /// The band type behind a virtual zone slot, `None` for stored zones and empty slots.
    fn zone_type(&self, slot: usize) -> Option<AutoZoneType>;
}

impl ZoneSlots for [AutoZoneType] {
    fn zone_type(&self, slot: usize) -> Option<AutoZoneType> {
        self.get(slot)
            .copied()
            .filter(|zone_type| *zone_type != AutoZoneType::None)
    }
}

/// Virtual zones appended after the stored ones, one per enabled band plan in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoZoneSlots {
    pub first_slot: usize,
}

impl ZoneSlots for AutoZoneSlots {
    fn zone_type(&self, slot: usize) -> Option<AutoZoneType> {
        let nth = slot.checked_sub(self.first_slot)?;
        enabled_plans().nth(nth).map(|plan| plan.zone_type)
    }
}

// Written by `initialize` only. The firmware touches this from its control loop alone, so there
// is no lock around initialize and the queries that follow it.
static ACTIVE_ZONE: AtomicU8 = AtomicU8::new(AutoZoneType::None as u8);

/// Snapshot of the process-wide active zone.
pub fn active_zone() -> ActiveZone {
    let zone_type =
        AutoZoneType::from_u8(ACTIVE_ZONE.load(Ordering::Relaxed)).unwrap_or(AutoZoneType::None);
    ActiveZone { zone_type }
}

pub fn initialize(zone_type: AutoZoneType) {
    info!("autozone initialized to {}", zone_type.as_str());
    ACTIVE_ZONE.store(zone_type as u8, Ordering::Relaxed);
}

pub fn is_valid() -> bool {
    active_zone().is_valid()
}

pub fn is_current_zone<S: ZoneSlots + ?Sized>(slots: &S, zone_index: usize) -> bool {
    active_zone().is_current_zone(slots, zone_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_tracks_table() {
        let mut zone = ActiveZone::new();
        assert!(!zone.is_valid());
        assert_eq!(zone.plan(), Err(AutoZoneError::NoActiveBand));

        zone.initialize(AutoZoneType::Gmrs);
        assert!(zone.is_valid());
        assert_eq!(zone.plan().unwrap().name, "GMRS");

        zone.initialize(AutoZoneType::UsRailway);
        assert_eq!(zone.zone_type(), AutoZoneType::UsRailway);
        assert!(!zone.is_valid());

        zone.initialize(AutoZoneType::None);
        assert!(!zone.is_valid());
    }

    #[test]
    fn appended_slots_follow_enabled_plans() {
        let slots = AutoZoneSlots { first_slot: 3 };
        assert_eq!(slots.zone_type(2), None);
        assert_eq!(slots.zone_type(3), Some(AutoZoneType::Marine));
        assert_eq!(slots.zone_type(9), Some(AutoZoneType::Pmr446));
        assert_eq!(slots.zone_type(10), None);
    }

    #[test]
    fn current_zone_by_slot() {
        let slots = [AutoZoneType::None, AutoZoneType::Frs, AutoZoneType::Murs];
        let mut zone = ActiveZone::new();
        assert!(!zone.is_current_zone(&slots[..], 0));

        zone.initialize(AutoZoneType::Murs);
        assert!(zone.is_current_zone(&slots[..], 2));
        assert!(!zone.is_current_zone(&slots[..], 1));
        assert!(!zone.is_current_zone(&slots[..], 5));
    }

    #[test]
    fn disabled_band_is_never_current() {
        let slots = [AutoZoneType::Marine, AutoZoneType::UsRailway];
        let mut zone = ActiveZone::new();
        zone.initialize(AutoZoneType::UsRailway);

        assert!(!zone.is_valid());
        assert!(!zone.is_current_zone(&slots[..], 1));
        assert!(!zone.is_current_zone(&slots[..], 0));
    }
}
