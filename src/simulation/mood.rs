//! Customer moods and how they move on a successful visit
//!
//! A mood belongs to an [`Appearance`](super::types::Appearance), not to a
//! single customer instance, so the same face coming back later resumes
//! where it left off.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotional state of a returning customer, from worst to best
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Mood {
    Broken,
    Mending,
    #[default]
    Normal,
    Growing,
    Sparkling,
    Arrow,
}

/// Every mood in ascending order
pub const ALL_MOODS: [Mood; 6] = [
    Mood::Broken,
    Mood::Mending,
    Mood::Normal,
    Mood::Growing,
    Mood::Sparkling,
    Mood::Arrow,
];

impl Mood {
    /// Next mood after a successful interaction. Saturates at `Arrow`.
    pub fn advance(self) -> Mood {
        match self {
            Mood::Broken => Mood::Mending,
            Mood::Mending => Mood::Normal,
            Mood::Normal => Mood::Growing,
            Mood::Growing => Mood::Sparkling,
            Mood::Sparkling => Mood::Arrow,
            Mood::Arrow => Mood::Arrow,
        }
    }

    /// Same as [`Mood::advance`] except `Arrow` wraps to `Broken`.
    pub fn cycle(self) -> Mood {
        match self {
            Mood::Arrow => Mood::Broken,
            other => other.advance(),
        }
    }

    /// Extra back-and-forth passes a wanderer makes before leaving.
    /// Happier regulars linger, which gives more chances to lure them.
    pub fn wander_loops(self) -> u32 {
        match self {
            Mood::Broken | Mood::Mending | Mood::Normal => 0,
            Mood::Growing => 1,
            Mood::Sparkling | Mood::Arrow => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Broken => "broken",
            Mood::Mending => "mending",
            Mood::Normal => "normal",
            Mood::Growing => "growing",
            Mood::Sparkling => "sparkling",
            Mood::Arrow => "arrow",
        }
    }

    /// Single character used by the ASCII street view
    pub fn glyph(self) -> char {
        match self {
            Mood::Broken => 'b',
            Mood::Mending => 'm',
            Mood::Normal => 'n',
            Mood::Growing => 'g',
            Mood::Sparkling => 's',
            Mood::Arrow => 'a',
        }
    }
}

/// Advance an optional mood; an unknown mood is returned unchanged.
pub fn advance_mood(state: Option<Mood>) -> Option<Mood> {
    state.map(Mood::advance)
}

/// Cycle an optional mood; an unknown mood falls back to `Normal`.
///
/// Unlike [`advance_mood`] this is a policy default, not the identity.
pub fn cycle_mood(state: Option<Mood>) -> Mood {
    state.map_or(Mood::Normal, Mood::cycle)
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match ALL_MOODS.iter().find(|mood| mood.label() == wanted) {
            Some(mood) => Ok(*mood),
            None => bail!("unknown mood '{}'", s),
        }
    }
}
