//! Responsive size table.
//!
//! Four named breakpoints ordered from narrowest to widest. The table is
//! plain data; lookups are free functions so a test can hand in its own
//! table through the `*_in` variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    XSmall,
    Small,
    Medium,
    Large,
}

impl Size {
    /// All sizes, narrowest first.
    pub const ALL: [Size; 4] = [Size::XSmall, Size::Small, Size::Medium, Size::Large];

    pub fn name(self) -> &'static str {
        match self {
            Size::XSmall => "xsmall",
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a name that is not one of the four sizes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown size `{0}`, expected one of xsmall, small, medium, large")]
pub struct UnknownSize(pub String);

impl FromStr for Size {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.name() == s)
            .ok_or_else(|| UnknownSize(s.to_string()))
    }
}

/// Pixel range of one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    pub size: Size,
    pub min: u32,
    pub default: u32,
    pub max: u32,
}

/// The builder's breakpoints, narrowest first.
#[rustfmt::skip]
pub const DEFAULT_BREAKPOINTS: [Breakpoint; 4] = [
    Breakpoint { size: Size::XSmall, min: 0,   default: 0,   max: 0 },
    Breakpoint { size: Size::Small,  min: 320, default: 321, max: 640 },
    Breakpoint { size: Size::Medium, min: 641, default: 642, max: 991 },
    Breakpoint { size: Size::Large,  min: 990, default: 991, max: 1200 },
];

/// The default-table record for `size`.
pub fn breakpoint(size: Size) -> &'static Breakpoint {
    // DEFAULT_BREAKPOINTS is laid out in `Size` declaration order.
    &DEFAULT_BREAKPOINTS[size as usize]
}

/// Representative width of `size` in the default table.
pub fn width_for_size(size: Size) -> u32 {
    width_for_size_in(&DEFAULT_BREAKPOINTS, size)
}

/// Representative width of `size` in `table`, or 0 if the table lacks it.
pub fn width_for_size_in(table: &[Breakpoint], size: Size) -> u32 {
    table
        .iter()
        .find(|bp| bp.size == size)
        .map_or(0, |bp| bp.default)
}

/// The narrowest size in the default table whose range reaches `width`.
pub fn size_for_width(width: i64) -> Size {
    size_for_width_in(&DEFAULT_BREAKPOINTS, width)
}

/// First breakpoint of `table` (ascending) whose `max` is at least `width`.
/// Anything wider than every `max` is `Large`.
pub fn size_for_width_in(table: &[Breakpoint], width: i64) -> Size {
    table
        .iter()
        .find(|bp| width <= i64::from(bp.max))
        .map_or(Size::Large, |bp| bp.size)
}

/// [`size_for_width`] for a fractional width, e.g. one measured in CSS
/// pixels. NaN matches no breakpoint and yields `Large`.
pub fn size_for_fractional_width(width: f64) -> Size {
    size_for_fractional_width_in(&DEFAULT_BREAKPOINTS, width)
}

pub fn size_for_fractional_width_in(table: &[Breakpoint], width: f64) -> Size {
    table
        .iter()
        .find(|bp| width <= f64::from(bp.max))
        .map_or(Size::Large, |bp| bp.size)
}
