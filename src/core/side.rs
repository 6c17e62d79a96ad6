use anyhow::{anyhow, Result};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use std::ops::{Index, IndexMut, Not};

/// Trait for converting from an index
pub trait FromIndex: Sized {
    fn from_index(idx: usize) -> Result<Self>;
}

/// Trait for converting to an index
pub trait ToIndex {
    fn to_index(&self) -> Result<usize>;
}

/// Side/player in the game. Red owns the y=0 back row and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub fn all() -> [Side; 2] {
        [Side::Red, Side::Blue]
    }

    pub fn sign(&self) -> i32 {
        match self {
            Side::Red => 1,
            Side::Blue => -1,
        }
    }

    /// Uncolored name, safe for thread labels and notation
    pub fn name(&self) -> &'static str {
        match self {
            Side::Red => "Red",
            Side::Blue => "Blue",
        }
    }

    /// Back row for this side's starting pieces
    pub fn home_row(&self) -> i32 {
        match self {
            Side::Red => 0,
            Side::Blue => super::loc::GRID_LEN as i32 - 1,
        }
    }
}

impl FromIndex for Side {
    fn from_index(idx: usize) -> Result<Self> {
        FromPrimitive::from_usize(idx)
            .ok_or_else(|| anyhow!("invalid side index: {}", idx))
    }
}

impl ToIndex for Side {
    fn to_index(&self) -> Result<usize> {
        ToPrimitive::to_usize(self)
            .ok_or_else(|| anyhow!("invalid side value"))
    }
}

impl Not for Side {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }
}

/// Array indexed by game side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideArray<T> {
    pub values: [T; 2],
}

impl<T> SideArray<T> {
    pub fn new(red: T, blue: T) -> Self {
        Self {
            values: [red, blue],
        }
    }

    pub fn get(&self, side: Side) -> Result<&T> {
        Ok(&self.values[side.to_index()?])
    }

    pub fn get_mut(&mut self, side: Side) -> Result<&mut T> {
        Ok(&mut self.values[side.to_index()?])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.values.iter_mut()
    }
}

impl<T> Index<Side> for SideArray<T> {
    type Output = T;

    fn index(&self, index: Side) -> &Self::Output {
        &self.values[index.to_index().unwrap()]
    }
}

impl<T> IndexMut<Side> for SideArray<T> {
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        &mut self.values[index.to_index().unwrap()]
    }
}
