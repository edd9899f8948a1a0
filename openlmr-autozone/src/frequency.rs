use crate::{
    error::AutoZoneError,
    plan::{BandPlan, Bank},
};

/// Receive and transmit frequencies in hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frequencies {
    pub rx: u32,
    pub tx: u32,
}

impl Frequencies {
    pub fn simplex(freq: u32) -> Frequencies {
        Frequencies { rx: freq, tx: freq }
    }

    pub fn is_duplex(&self) -> bool {
        self.rx != self.tx
    }
}

/// Computes the frequencies of the channel at `position` within `bank`.
///
/// The base grid is `start_frequency + position * channel_spacing` and must not pass
/// `end_frequency`. Interleaved banks sit half a step above the grid, or below it when
/// `interleaving_starts_prior` is set. Offset banks receive on the same frequency as the bank they
/// mirror and transmit `repeater_offset` away from it. With duplex off they are simplex, on the
/// receive frequency or, with `simplex_uses_tx_frequency`, on the shifted one.
///
/// Interleaved banks need an even `channel_spacing`; an odd one has no exact half step and is
/// reported as [`AutoZoneError::InvalidPlan`].
pub fn resolve_frequencies(
    plan: &BandPlan,
    bank: Bank,
    position: u16,
) -> Result<Frequencies, AutoZoneError> {
    if position >= u16::from(plan.total_channels_in_base_bank) {
        return Err(AutoZoneError::OutOfRange);
    }

    let grid = u32::from(position)
        .checked_mul(plan.channel_spacing)
        .and_then(|span| plan.start_frequency.checked_add(span))
        .filter(|grid| *grid <= plan.end_frequency)
        .ok_or(AutoZoneError::InvalidPlan)?;

    if bank.is_interleaved() && plan.channel_spacing % 2 != 0 {
        return Err(AutoZoneError::InvalidPlan);
    }
    let half_step = plan.channel_spacing / 2;
    let rx = match (bank.is_interleaved(), plan.flags.interleaving_starts_prior) {
        (false, _) => Some(grid),
        (true, true) => grid.checked_sub(half_step),
        (true, false) => grid.checked_add(half_step),
    };
    let rx = rx.ok_or(AutoZoneError::InvalidPlan)?;

    if !bank.is_offset() {
        return Ok(Frequencies::simplex(rx));
    }

    let shifted = if plan.flags.offset_direction_plus {
        rx.checked_add(plan.repeater_offset)
    } else {
        rx.checked_sub(plan.repeater_offset)
    };
    let shifted = shifted.ok_or(AutoZoneError::InvalidPlan)?;

    Ok(if plan.flags.duplex_enabled {
        Frequencies { rx, tx: shifted }
    } else if plan.flags.simplex_uses_tx_frequency {
        Frequencies::simplex(shifted)
    } else {
        Frequencies::simplex(rx)
    })
}

/// Base bank position of a frequency that sits exactly on the base grid.
pub fn base_position_for_frequency(plan: &BandPlan, freq: u32) -> Option<u16> {
    if plan.channel_spacing == 0 || freq < plan.start_frequency || freq > plan.end_frequency {
        return None;
    }
    let offset = freq - plan.start_frequency;
    if offset % plan.channel_spacing != 0 {
        return None;
    }
    u16::try_from(offset / plan.channel_spacing)
        .ok()
        .filter(|position| *position < u16::from(plan.total_channels_in_base_bank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::AutoZoneFlags;

    fn plan(flags: AutoZoneFlags) -> BandPlan {
        BandPlan {
            flags: AutoZoneFlags {
                enabled: true,
                ..flags
            },
            start_frequency: 462_550_000,
            end_frequency: 462_725_000,
            channel_spacing: 25_000,
            repeater_offset: 5_000_000,
            total_channels_in_base_bank: 8,
            ..BandPlan::EMPTY
        }
    }

    #[test]
    fn base_grid() {
        let plan = plan(AutoZoneFlags::NONE);
        assert_eq!(
            resolve_frequencies(&plan, Bank::Base, 0),
            Ok(Frequencies::simplex(462_550_000))
        );
        assert_eq!(
            resolve_frequencies(&plan, Bank::Base, 7),
            Ok(Frequencies::simplex(462_725_000))
        );
        assert_eq!(
            resolve_frequencies(&plan, Bank::Base, 8),
            Err(AutoZoneError::OutOfRange)
        );
    }

    #[test]
    fn interleaving_direction() {
        let after = plan(AutoZoneFlags::NONE);
        assert_eq!(
            resolve_frequencies(&after, Bank::Interleaved, 0).unwrap().rx,
            462_562_500
        );

        let prior = plan(AutoZoneFlags {
            interleaving_starts_prior: true,
            ..AutoZoneFlags::NONE
        });
        assert_eq!(
            resolve_frequencies(&prior, Bank::Interleaved, 0).unwrap().rx,
            462_537_500
        );
        assert_eq!(
            resolve_frequencies(&prior, Bank::Interleaved, 7).unwrap().rx,
            462_712_500
        );
    }

    #[test]
    fn odd_spacing_has_no_interleave() {
        let odd = BandPlan {
            start_frequency: 476_000,
            end_frequency: 476_175,
            channel_spacing: 25,
            ..plan(AutoZoneFlags::NONE)
        };
        assert_eq!(
            resolve_frequencies(&odd, Bank::Base, 7),
            Ok(Frequencies::simplex(476_175))
        );
        assert_eq!(
            resolve_frequencies(&odd, Bank::Interleaved, 0),
            Err(AutoZoneError::InvalidPlan)
        );
        assert_eq!(
            resolve_frequencies(&odd, Bank::OffsetInterleaved, 0),
            Err(AutoZoneError::InvalidPlan)
        );
    }

    #[test]
    fn offset_banks_shift_tx() {
        let plus = plan(AutoZoneFlags {
            duplex_enabled: true,
            offset_direction_plus: true,
            has_bank_at_offset: true,
            ..AutoZoneFlags::NONE
        });
        assert_eq!(
            resolve_frequencies(&plus, Bank::OffsetBase, 2),
            Ok(Frequencies {
                rx: 462_600_000,
                tx: 467_600_000
            })
        );
        assert_eq!(
            resolve_frequencies(&plus, Bank::OffsetInterleaved, 0),
            Ok(Frequencies {
                rx: 462_562_500,
                tx: 467_562_500
            })
        );

        let minus = BandPlan {
            flags: AutoZoneFlags {
                offset_direction_plus: false,
                ..plus.flags
            },
            ..plus
        };
        assert_eq!(
            resolve_frequencies(&minus, Bank::OffsetBase, 2).unwrap().tx,
            457_600_000
        );
    }

    #[test]
    fn offset_banks_without_duplex_are_simplex() {
        let on_rx = plan(AutoZoneFlags {
            offset_direction_plus: true,
            has_bank_at_offset: true,
            ..AutoZoneFlags::NONE
        });
        assert_eq!(
            resolve_frequencies(&on_rx, Bank::OffsetBase, 0),
            Ok(Frequencies::simplex(462_550_000))
        );

        let on_tx = BandPlan {
            flags: AutoZoneFlags {
                simplex_uses_tx_frequency: true,
                ..on_rx.flags
            },
            ..on_rx
        };
        assert_eq!(
            resolve_frequencies(&on_tx, Bank::OffsetBase, 0),
            Ok(Frequencies::simplex(467_550_000))
        );
    }

    #[test]
    fn grid_past_end_is_a_plan_defect() {
        let short = BandPlan {
            end_frequency: 462_700_000,
            ..plan(AutoZoneFlags::NONE)
        };
        assert_eq!(
            resolve_frequencies(&short, Bank::Base, 7),
            Err(AutoZoneError::InvalidPlan)
        );

        let underflow = BandPlan {
            repeater_offset: 500_000_000,
            ..plan(AutoZoneFlags {
                duplex_enabled: true,
                has_bank_at_offset: true,
                ..AutoZoneFlags::NONE
            })
        };
        assert_eq!(
            resolve_frequencies(&underflow, Bank::OffsetBase, 0),
            Err(AutoZoneError::InvalidPlan)
        );
    }

    #[test]
    fn base_position_reverses_the_grid() {
        let plan = plan(AutoZoneFlags::NONE);
        for position in 0..8 {
            let rx = resolve_frequencies(&plan, Bank::Base, position).unwrap().rx;
            assert_eq!(base_position_for_frequency(&plan, rx), Some(position));
        }
        assert_eq!(base_position_for_frequency(&plan, 462_562_500), None);
        assert_eq!(base_position_for_frequency(&plan, 462_525_000), None);
    }
}
