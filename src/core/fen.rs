use anyhow::{bail, ensure, Context, Result};

use crate::core::{
    loc::{Loc, GRID_LEN},
    piece::{Piece, PieceId, PieceKind},
    side::{FromIndex, Side, ToIndex},
    state::GameState,
};

impl GameState {
    /// Convert state to FEN notation:
    /// `<rows> <side_to_move> <turn>`
    /// - Rows run from y=0, separated by '/', with digit runs for empties.
    /// - Red pieces are uppercase.
    ///
    /// Damage and the fallen census are transient and not encoded.
    pub fn to_fen(&self) -> Result<String> {
        let mut fen = String::new();

        for y in 0..GRID_LEN as i32 {
            let mut empty_squares = 0;
            for x in 0..GRID_LEN as i32 {
                let loc = Loc::new(x, y);
                if let Some(piece) = self.piece_at(loc) {
                    if empty_squares > 0 {
                        fen.push_str(&empty_squares.to_string());
                        empty_squares = 0;
                    }
                    fen.push(piece.kind.to_fen_char(piece.side));
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares > 0 {
                fen.push_str(&empty_squares.to_string());
            }
            if y < (GRID_LEN - 1) as i32 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push_str(&self.side_to_move.to_index()?.to_string());

        fen.push(' ');
        fen.push_str(&self.turn.to_string());

        Ok(fen)
    }

    /// Parse state from FEN notation. Piece ids are assigned in reading
    /// order, so the same FEN always produces the same ids.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut parts = fen.split_whitespace();

        let rows = parts.next().context("missing board rows")?;
        let mut state = GameState::empty();
        let mut next_id = 0;
        let mut y = 0;

        for row in rows.split('/') {
            ensure!(y < GRID_LEN as i32, "too many rows");
            let mut x = 0;
            for c in row.chars() {
                if let Some(digit) = c.to_digit(10) {
                    ensure!(digit >= 1, "empty run of zero");
                    x += digit as i32;
                } else {
                    let (kind, side) = PieceKind::from_fen_char(c)?;
                    ensure!(x < GRID_LEN as i32, "row {} overflows the board", y);
                    state.add_piece(Piece::new(PieceId(next_id), kind, side, Loc::new(x, y)));
                    next_id += 1;
                    x += 1;
                }
            }
            ensure!(x == GRID_LEN as i32, "row {} has {} squares", y, x);
            y += 1;
        }
        ensure!(y == GRID_LEN as i32, "expected {} rows, got {}", GRID_LEN, y);

        let side_idx = parts.next()
            .context("missing side to move")?
            .parse::<usize>()
            .context("invalid side to move")?;
        state.side_to_move = Side::from_index(side_idx)?;

        state.turn = parts.next()
            .context("missing turn number")?
            .parse()
            .context("invalid turn number")?;

        if parts.next().is_some() {
            bail!("trailing fields in FEN");
        }

        Ok(state)
    }
}
