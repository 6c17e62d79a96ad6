use std::collections::{HashMap, HashSet};
use anyhow::{Context, Result};
use hashbag::HashBag;

use super::{
    loc::{Loc, DIRECTIONS},
    piece::{Piece, PieceId, PieceKind},
    side::{Side, SideArray},
};

/// Back-row deployment, mirrored for both sides
const DEPLOYMENT: [(i32, PieceKind); 6] = [
    (1, PieceKind::Scrapper),
    (2, PieceKind::Bruiser),
    (3, PieceKind::Scrapper),
    (4, PieceKind::Scrapper),
    (5, PieceKind::Bruiser),
    (6, PieceKind::Scrapper),
];

/// Full state of a game in progress
#[derive(Debug, Clone)]
pub struct GameState {
    pub side_to_move: Side,
    pub turn: u32,
    pub pieces: HashMap<PieceId, Piece>,
    /// Census of pieces each side has lost
    pub fallen: SideArray<HashBag<PieceKind>>,
    pub winner: Option<Side>,
}

impl GameState {
    pub fn empty() -> Self {
        Self {
            side_to_move: Side::Red,
            turn: 0,
            pieces: HashMap::new(),
            fallen: SideArray::new(HashBag::new(), HashBag::new()),
            winner: None,
        }
    }

    /// Standard starting position: each side's deployment on its home row,
    /// Red to move.
    pub fn initial() -> Self {
        let mut state = Self::empty();
        let mut next_id = 0;

        for side in Side::all() {
            let y = side.home_row();
            for (x, kind) in DEPLOYMENT {
                let piece = Piece::new(PieceId(next_id), kind, side, Loc::new(x, y));
                next_id += 1;
                state.add_piece(piece);
            }
        }

        state
    }

    pub fn piece(&self, id: PieceId) -> Result<&Piece> {
        self.pieces.get(&id)
            .with_context(|| format!("no piece {}", id))
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Result<&mut Piece> {
        self.pieces.get_mut(&id)
            .with_context(|| format!("no piece {}", id))
    }

    pub fn piece_at(&self, loc: Loc) -> Option<&Piece> {
        self.pieces.values().find(|piece| piece.loc == loc)
    }

    /// Pieces of one side, ordered by id so enumeration is reproducible
    pub fn pieces_of(&self, side: Side) -> Vec<&Piece> {
        let mut pieces: Vec<_> = self.pieces.values()
            .filter(|piece| piece.side == side)
            .collect();
        pieces.sort_by_key(|piece| piece.id);
        pieces
    }

    pub fn alive(&self, side: Side) -> usize {
        self.pieces.values().filter(|piece| piece.side == side).count()
    }

    pub fn add_piece(&mut self, piece: Piece) {
        debug_assert!(self.piece_at(piece.loc).is_none());
        self.pieces.insert(piece.id, piece);
    }

    pub fn remove_piece(&mut self, id: PieceId) -> Option<Piece> {
        self.pieces.remove(&id)
    }

    /// Squares reachable from `from` within `speed` steps, moving through
    /// empty in-bounds squares only. `from` itself is not included. Output
    /// order follows the breadth-first expansion, so it is deterministic.
    pub fn reachable(&self, from: Loc, speed: i32) -> Vec<Loc> {
        let mut seen = HashSet::from([from]);
        let mut frontier = vec![from];
        let mut out = Vec::new();

        for _ in 0..speed {
            let mut next = Vec::new();
            for loc in &frontier {
                for dir in &DIRECTIONS {
                    let to = loc + dir;
                    if to.in_bounds() && self.piece_at(to).is_none() && seen.insert(to) {
                        out.push(to);
                        next.push(to);
                    }
                }
            }
            frontier = next;
        }

        out
    }
}
