//! The enumerated grid sizes a user can pick

use std::fmt;

use clap::ValueEnum;

use crate::io::configuration::METERS_PER_KILOMETER;

/// Grid edge length choices, in kilometres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum GridSize {
    /// 20 km cells
    #[value(name = "20")]
    Km20,
    /// 50 km cells
    #[value(name = "50")]
    Km50,
    /// 100 km cells
    #[value(name = "100")]
    Km100,
}

impl GridSize {
    /// Every selectable size, smallest first
    pub const ALL: [Self; 3] = [Self::Km20, Self::Km50, Self::Km100];

    /// Edge length in kilometres
    pub const fn kilometers(self) -> u32 {
        match self {
            Self::Km20 => 20,
            Self::Km50 => 50,
            Self::Km100 => 100,
        }
    }

    /// Edge length in metres, as passed to the sweep
    pub fn meters(self) -> f64 {
        f64::from(self.kilometers()) * METERS_PER_KILOMETER
    }

    /// Look up the choice for an edge length in kilometres
    pub fn from_kilometers(kilometers: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.kilometers() == kilometers)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}km", self.kilometers())
    }
}
