use crate::{
    error::AutoZoneError,
    plan::{BandPlan, Bank},
};

/// Where a flat channel index lands within a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MappedIndex {
    pub bank: Bank,
    /// 0-based position within the bank.
    pub position: u16,
    /// Channel number shown to the user.
    pub channel_number: u16,
}

/// Maps a 0-based flat index onto the band's enabled banks. Each enabled bank owns
/// `total_channels_in_base_bank` consecutive indices, in [`Bank::ORDER`].
pub fn map_index(plan: &BandPlan, index: u16) -> Result<MappedIndex, AutoZoneError> {
    let n = u16::from(plan.total_channels_in_base_bank);
    if n == 0 || index >= plan.total_channels() {
        return Err(AutoZoneError::OutOfRange);
    }

    let bank = plan
        .enabled_banks()
        .nth(usize::from(index / n))
        .ok_or(AutoZoneError::OutOfRange)?;
    let position = index % n;
    let channel_number = if plan.flags.has_base_index {
        plan.number_start(bank).saturating_add(position)
    } else {
        1 + position
    };

    Ok(MappedIndex {
        bank,
        position,
        channel_number,
    })
}

/// Finds the flat index of a displayed channel number within one bank.
pub fn index_for_channel_number(
    plan: &BandPlan,
    bank: Bank,
    channel_number: u16,
) -> Result<u16, AutoZoneError> {
    let n = u16::from(plan.total_channels_in_base_bank);
    let ordinal = plan
        .enabled_banks()
        .position(|enabled| enabled == bank)
        .ok_or(AutoZoneError::OutOfRange)? as u16;
    let start = if plan.flags.has_base_index {
        plan.number_start(bank)
    } else {
        1
    };
    let position = channel_number
        .checked_sub(start)
        .filter(|position| *position < n)
        .ok_or(AutoZoneError::OutOfRange)?;
    Ok(ordinal * n + position)
}

/// Every channel of a band in flat index order.
pub fn channels(plan: &BandPlan) -> Channels<'_> {
    Channels { plan, next: 0 }
}

pub struct Channels<'a> {
    plan: &'a BandPlan,
    next: u16,
}

impl Iterator for Channels<'_> {
    type Item = (u16, MappedIndex);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        let mapped = map_index(self.plan, index).ok()?;
        self.next += 1;
        Some((index, mapped))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.plan.total_channels().saturating_sub(self.next));
        (remaining, Some(remaining))
    }
}
