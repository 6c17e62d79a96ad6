use std::fmt;
use colored::Colorize;

use super::{
    loc::{Loc, GRID_LEN},
    piece::Piece,
    side::Side,
    state::GameState,
};

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        match self.winner {
            Some(winner) => writeln!(f, "Winner: {}", winner)?,
            None => writeln!(f, "Turn {}: {} to move", self.turn, self.side_to_move)?,
        }

        for side in Side::all() {
            let fallen = &self.fallen[side];
            if fallen.len() > 0 {
                let names: Vec<_> = fallen.iter().map(|kind| kind.to_string()).collect();
                writeln!(f, "{} lost: {}", side, names.join(", "))?;
            }
        }
        writeln!(f)?;

        write!(f, "   ")?;
        for x in 0..GRID_LEN as u8 {
            write!(f, " {} ", (x + b'a') as char)?;
        }
        writeln!(f)?;

        writeln!(f, "   {}", "─".repeat(GRID_LEN * 3))?;

        // Blue's home row on top, Red's at the bottom
        for y in (0..GRID_LEN as i32).rev() {
            write!(f, "{:2} ", y)?;
            for x in 0..GRID_LEN as i32 {
                let loc = Loc::new(x, y);
                if let Some(piece) = self.piece_at(loc) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " · ")?;
                }
            }
            writeln!(f)?;
        }

        writeln!(f, "   {}", "─".repeat(GRID_LEN * 3))?;
        Ok(())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.to_fen_char(self.side).to_string();

        let colored_symbol = match self.side {
            Side::Red => symbol.bright_red(),
            Side::Blue => symbol.bright_blue(),
        };

        write!(f, "{}", colored_symbol)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "{}", "Red".bright_red()),
            Side::Blue => write!(f, "{}", "Blue".bright_blue()),
        }
    }
}
