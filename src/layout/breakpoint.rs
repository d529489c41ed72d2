//! Responsive breakpoints and their grid geometry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A responsive viewport tier.
///
/// Ordered widest first, which is also the order layouts are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// 1200px and wider, 12 columns.
    Lg,
    /// 996px and wider, 10 columns.
    Md,
    /// 768px and wider, 6 columns.
    Sm,
    /// 480px and wider, 4 columns.
    Xs,
    /// Anything narrower, 2 columns.
    Xxs,
}

impl Breakpoint {
    /// Every breakpoint, widest first.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Sm,
        Breakpoint::Xs,
        Breakpoint::Xxs,
    ];

    /// Grid columns available at this breakpoint.
    pub const fn columns(self) -> u32 {
        match self {
            Breakpoint::Lg => 12,
            Breakpoint::Md => 10,
            Breakpoint::Sm => 6,
            Breakpoint::Xs => 4,
            Breakpoint::Xxs => 2,
        }
    }

    /// Narrowest viewport width, in pixels, that selects this breakpoint.
    pub const fn min_width_px(self) -> u32 {
        match self {
            Breakpoint::Lg => 1200,
            Breakpoint::Md => 996,
            Breakpoint::Sm => 768,
            Breakpoint::Xs => 480,
            Breakpoint::Xxs => 0,
        }
    }

    /// Picks the widest breakpoint whose minimum width fits `width_px`.
    pub fn for_width(width_px: u32) -> Self {
        Breakpoint::ALL
            .into_iter()
            .find(|bp| width_px >= bp.min_width_px())
            .unwrap_or(Breakpoint::Xxs)
    }

    /// Wire name (`lg`, `md`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Sm => "sm",
            Breakpoint::Xs => "xs",
            Breakpoint::Xxs => "xxs",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error type for parsing [`Breakpoint`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBreakpointError(pub String);

impl fmt::Display for ParseBreakpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid breakpoint: {} (expected lg, md, sm, xs or xxs)", self.0)
    }
}

impl std::error::Error for ParseBreakpointError {}

impl FromStr for Breakpoint {
    type Err = ParseBreakpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lg" => Ok(Breakpoint::Lg),
            "md" => Ok(Breakpoint::Md),
            "sm" => Ok(Breakpoint::Sm),
            "xs" => Ok(Breakpoint::Xs),
            "xxs" => Ok(Breakpoint::Xxs),
            _ => Err(ParseBreakpointError(s.to_string())),
        }
    }
}
