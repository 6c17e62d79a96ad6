use std::{
    fmt::Display, ops::{Add, Neg, Sub}, str::FromStr
};
use anyhow::{bail, Context};

pub const GRID_LEN: usize = 8;
pub const GRID_SIZE: usize = GRID_LEN * GRID_LEN;

/// A square on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Loc {
    pub x: i32,
    pub y: i32,
}

impl Loc {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < GRID_LEN as i32 &&
        self.y >= 0 && self.y < GRID_LEN as i32
    }

    pub fn neighbors(&self) -> Vec<Loc> {
        DIRECTIONS.iter()
            .map(|dir| self + dir)
            .filter(|loc| loc.in_bounds())
            .collect()
    }

    pub fn dist(&self, other: &Loc) -> i32 {
        (self - other).length()
    }

    pub fn index(&self) -> usize {
        (self.y as usize) * GRID_LEN + (self.x as usize)
    }
}

impl From<(i32, i32)> for Loc {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl FromStr for Loc {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file = chars.next().context("empty loc")?;
        let rank = chars.next().context("loc missing rank")?;
        if chars.next().is_some() {
            bail!("trailing characters in loc '{}'", s);
        }

        let loc = Loc {
            x: file as i32 - 'a' as i32,
            y: rank.to_digit(10).with_context(|| format!("bad rank in loc '{}'", s))? as i32,
        };

        if !loc.in_bounds() {
            bail!("loc '{}' is off the board", s);
        }

        Ok(loc)
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (self.x as u8).wrapping_add(b'a') as char, self.y)
    }
}

/// Offset between two squares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocDelta {
    pub dx: i32,
    pub dy: i32,
}

impl LocDelta {
    /// Chebyshev length: squares touching diagonally are at distance 1
    pub fn length(&self) -> i32 {
        self.dx.abs().max(self.dy.abs())
    }

    pub const fn is_orthogonal(&self) -> bool {
        self.dx == 0 || self.dy == 0
    }
}

impl Add<&LocDelta> for &Loc {
    type Output = Loc;

    fn add(self, other: &LocDelta) -> Self::Output {
        Loc {
            x: self.x + other.dx,
            y: self.y + other.dy,
        }
    }
}

impl Sub<&LocDelta> for &Loc {
    type Output = Loc;

    fn sub(self, other: &LocDelta) -> Self::Output {
        Loc {
            x: self.x - other.dx,
            y: self.y - other.dy,
        }
    }
}

impl Sub<&Loc> for &Loc {
    type Output = LocDelta;

    fn sub(self, other: &Loc) -> Self::Output {
        LocDelta {
            dx: self.x - other.x,
            dy: self.y - other.y,
        }
    }
}

impl Add<&LocDelta> for &LocDelta {
    type Output = LocDelta;

    fn add(self, other: &LocDelta) -> Self::Output {
        LocDelta {
            dx: self.dx + other.dx,
            dy: self.dy + other.dy,
        }
    }
}

impl Neg for &LocDelta {
    type Output = LocDelta;

    fn neg(self) -> Self::Output {
        LocDelta {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

/// The eight unit offsets, orthogonals before diagonals. A `static` so every
/// caller sees the one collection instance.
pub static DIRECTIONS: [LocDelta; 8] = [
    LocDelta { dx: -1, dy: 0 },
    LocDelta { dx: 1, dy: 0 },
    LocDelta { dx: 0, dy: 1 },
    LocDelta { dx: 0, dy: -1 },
    LocDelta { dx: -1, dy: 1 },
    LocDelta { dx: -1, dy: -1 },
    LocDelta { dx: 1, dy: 1 },
    LocDelta { dx: 1, dy: -1 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loc_roundtrip() {
        for x in 0..GRID_LEN as i32 {
            for y in 0..GRID_LEN as i32 {
                let loc = Loc::new(x, y);
                let parsed: Loc = loc.to_string().parse().unwrap();
                assert_eq!(loc, parsed);
            }
        }
    }

    #[test]
    fn test_loc_parse_rejects_junk() {
        assert!("".parse::<Loc>().is_err());
        assert!("a".parse::<Loc>().is_err());
        assert!("a8".parse::<Loc>().is_err());
        assert!("i0".parse::<Loc>().is_err());
        assert!("a00".parse::<Loc>().is_err());
    }

    #[test]
    fn test_directions_shape() {
        assert_eq!(DIRECTIONS.len(), 8);
        assert_eq!(DIRECTIONS.iter().filter(|d| d.is_orthogonal()).count(), 4);
        for dir in &DIRECTIONS {
            assert_eq!(dir.length(), 1);
        }
        for (i, a) in DIRECTIONS.iter().enumerate() {
            for b in &DIRECTIONS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_chebyshev_dist() {
        let a = Loc::new(2, 2);
        assert_eq!(a.dist(&Loc::new(3, 3)), 1);
        assert_eq!(a.dist(&Loc::new(2, 5)), 3);
        assert_eq!(a.dist(&Loc::new(0, 5)), 3);
        assert_eq!(a.dist(&a), 0);
    }

    #[test]
    fn test_corner_neighbors() {
        assert_eq!(Loc::new(0, 0).neighbors().len(), 3);
        assert_eq!(Loc::new(3, 0).neighbors().len(), 5);
        assert_eq!(Loc::new(3, 3).neighbors().len(), 8);
    }
}
