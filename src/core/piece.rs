use std::fmt;
use anyhow::{bail, Result};

use super::{loc::Loc, side::Side};

/// Stable identity of a piece for the whole match. Events refer to pieces
/// by id, never by board position, so replicas stay aligned after moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Scrapper,
    Bruiser,
}

/// Combat profile of a piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindStats {
    /// Squares of movement per turn
    pub speed: i32,
    /// Damage dealt by one strike
    pub power: i32,
    /// Damage required to remove the piece
    pub toughness: i32,
    /// Material value for evaluation
    pub worth: i32,
}

const SCRAPPER: KindStats = KindStats {
    speed: 2,
    power: 1,
    toughness: 1,
    worth: 2,
};

const BRUISER: KindStats = KindStats {
    speed: 1,
    power: 2,
    toughness: 3,
    worth: 5,
};

impl PieceKind {
    pub fn all() -> [PieceKind; 2] {
        [PieceKind::Scrapper, PieceKind::Bruiser]
    }

    pub const fn stats(&self) -> &'static KindStats {
        match self {
            PieceKind::Scrapper => &SCRAPPER,
            PieceKind::Bruiser => &BRUISER,
        }
    }

    pub fn to_fen_char(&self, side: Side) -> char {
        let ch = match self {
            PieceKind::Scrapper => 's',
            PieceKind::Bruiser => 'b',
        };
        match side {
            Side::Red => ch.to_ascii_uppercase(),
            Side::Blue => ch,
        }
    }

    pub fn from_fen_char(c: char) -> Result<(PieceKind, Side)> {
        let side = if c.is_ascii_uppercase() { Side::Red } else { Side::Blue };
        let kind = match c.to_ascii_lowercase() {
            's' => PieceKind::Scrapper,
            'b' => PieceKind::Bruiser,
            _ => bail!("unknown piece char '{}'", c),
        };
        Ok((kind, side))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Scrapper => write!(f, "scrapper"),
            PieceKind::Bruiser => write!(f, "bruiser"),
        }
    }
}

/// A piece on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub side: Side,
    pub loc: Loc,
    pub damage: i32,
}

impl Piece {
    pub fn new(id: PieceId, kind: PieceKind, side: Side, loc: Loc) -> Self {
        Self {
            id,
            kind,
            side,
            loc,
            damage: 0,
        }
    }

    /// Toughness left before removal
    pub fn remaining(&self) -> i32 {
        self.kind.stats().toughness - self.damage
    }
}
