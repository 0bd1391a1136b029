//! Static mapping between wheel numbers, their colors and their physical position on
//! a single-zero wheel.

use crate::common::defs::Discrete;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Count of distinct numbers on the wheel.
pub const NUMBERS: usize = 37;

/// Numbers clockwise from the zero pocket.
const WHEEL_ORDER: [u8; NUMBERS] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Black,
}

impl Color {
    /// Categorical class used by the color-code model: green 0, black 1, red 2.
    pub fn class_index(&self) -> Discrete {
        match self {
            Color::Green => 0,
            Color::Black => 1,
            Color::Red => 2,
        }
    }

    pub fn from_class_index(class: Discrete) -> Result<Self> {
        match class {
            0 => Ok(Color::Green),
            1 => Ok(Color::Black),
            2 => Ok(Color::Red),
            c => Err(Error::invalid_parameter(format!(
                "color class {c} is outside 0..=2"
            ))),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Black => "black",
        };
        f.write_str(name)
    }
}

/// A number in `0..=36`. Only constructible through validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct WheelNumber(u8);

impl WheelNumber {
    pub const ZERO: WheelNumber = WheelNumber(0);

    pub fn new(n: i64) -> Result<Self> {
        if (0..NUMBERS as i64).contains(&n) {
            Ok(Self(n as u8))
        } else {
            Err(Error::invalid_parameter(format!(
                "wheel number {n} is outside 0..=36"
            )))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = WheelNumber> {
        (0..NUMBERS as u8).map(WheelNumber)
    }
}

impl TryFrom<i64> for WheelNumber {
    type Error = Error;

    fn try_from(n: i64) -> Result<Self> {
        Self::new(n)
    }
}

impl From<WheelNumber> for u8 {
    fn from(n: WheelNumber) -> u8 {
        n.0
    }
}

impl From<WheelNumber> for Discrete {
    fn from(n: WheelNumber) -> Discrete {
        n.0 as Discrete
    }
}

impl fmt::Display for WheelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical pocket index, clockwise from zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct WheelPosition(u8);

impl WheelPosition {
    pub fn new(index: i64) -> Result<Self> {
        if (0..NUMBERS as i64).contains(&index) {
            Ok(Self(index as u8))
        } else {
            Err(Error::invalid_parameter(format!(
                "wheel position {index} is outside 0..=36"
            )))
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i64> for WheelPosition {
    type Error = Error;

    fn try_from(index: i64) -> Result<Self> {
        Self::new(index)
    }
}

impl From<WheelPosition> for u8 {
    fn from(p: WheelPosition) -> u8 {
        p.0
    }
}

#[derive(Clone, Debug)]
pub struct WheelTopology {
    colors: [Color; NUMBERS],
    positions: [WheelPosition; NUMBERS],
    greens: BTreeSet<WheelNumber>,
    reds: BTreeSet<WheelNumber>,
    blacks: BTreeSet<WheelNumber>,
}

impl WheelTopology {
    pub fn european() -> Self {
        let mut colors = [Color::Black; NUMBERS];
        colors[0] = Color::Green;
        for n in RED_NUMBERS {
            colors[n as usize] = Color::Red;
        }

        let mut positions = [WheelPosition(0); NUMBERS];
        for (pos, n) in WHEEL_ORDER.iter().enumerate() {
            positions[*n as usize] = WheelPosition(pos as u8);
        }

        let numbers_with = |c: Color| {
            WheelNumber::all()
                .filter(|n| colors[n.0 as usize] == c)
                .collect::<BTreeSet<_>>()
        };

        Self {
            greens: numbers_with(Color::Green),
            reds: numbers_with(Color::Red),
            blacks: numbers_with(Color::Black),
            colors,
            positions,
        }
    }

    pub fn color_of(&self, n: WheelNumber) -> Color {
        self.colors[n.0 as usize]
    }

    pub fn position_of(&self, n: WheelNumber) -> WheelPosition {
        self.positions[n.0 as usize]
    }

    pub fn number_at(&self, position: WheelPosition) -> WheelNumber {
        WheelNumber(WHEEL_ORDER[position.index()])
    }

    pub fn position(&self, index: usize) -> Result<WheelPosition> {
        i64::try_from(index)
            .map_err(|_| Error::invalid_parameter(format!("wheel position {index} is too large")))
            .and_then(WheelPosition::new)
    }

    pub fn numbers_of(&self, color: Color) -> &BTreeSet<WheelNumber> {
        match color {
            Color::Green => &self.greens,
            Color::Red => &self.reds,
            Color::Black => &self.blacks,
        }
    }
}

impl Default for WheelTopology {
    fn default() -> Self {
        Self::european()
    }
}
