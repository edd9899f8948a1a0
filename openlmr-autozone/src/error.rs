use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoZoneError {
    /// The band type has no entry in the band plan table.
    NotFound,
    /// The flat index is past the channels of the band's enabled banks.
    OutOfRange,
    /// No band is active, or the active band is disabled.
    NoActiveBand,
    /// The band plan's arithmetic runs past its end frequency or out of `u32`.
    InvalidPlan,
}

impl fmt::Display for AutoZoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoZoneError::NotFound => f.write_str("band plan not found"),
            AutoZoneError::OutOfRange => f.write_str("channel index out of range"),
            AutoZoneError::NoActiveBand => f.write_str("no valid autozone is active"),
            AutoZoneError::InvalidPlan => f.write_str("band plan is inconsistent"),
        }
    }
}
