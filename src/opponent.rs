//! Single-ply greedy move choice for the computer.
//!
//! Squares are sorted into three tiers:
//! 0. three sides taken: closing it is a free point,
//! 1. zero or one side taken, with at least one side that does not leave a
//!    neighbour on three sides,
//! 2. everything else that is still open (two sides taken, or no safe side).
//!
//! A square is drawn at random from the best non-empty tier.

use crate::board::{Board, Side, SquarePos};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// An open square and the sides of it that are safe to take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prospect {
    pub pos: SquarePos,
    pub safe_sides: Vec<Side>,
}

/// The computer's decision: a square and, for tier 1, the side to take.
/// Without a side, any free side of the square will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub pos: SquarePos,
    pub side: Option<Side>,
    pub tier: usize,
}

/// Free sides of `pos` whose neighbour (if any) has fewer than two sides
/// taken. Checked in Left, Right, Top, Bottom order.
pub fn safe_sides(board: &Board, pos: SquarePos) -> Vec<Side> {
    [Side::Left, Side::Right, Side::Top, Side::Bottom]
        .into_iter()
        .filter(|side| !board.is_claimed(pos, *side))
        .filter(|side| match board.neighbor_of(pos, *side) {
            Some(neighbor) => board.completion_count(neighbor) < 2,
            None => true,
        })
        .collect()
}

/// Every open square, bucketed by priority.
pub fn tiers(board: &Board) -> [Vec<Prospect>; 3] {
    let mut tiers: [Vec<Prospect>; 3] = Default::default();

    for square in board.squares() {
        let pos = square.pos;
        match board.completion_count(pos) {
            3 => tiers[0].push(Prospect {
                pos,
                safe_sides: Vec::new(),
            }),
            0 | 1 => {
                let sides = safe_sides(board, pos);
                let tier = if sides.is_empty() { 2 } else { 1 };
                tiers[tier].push(Prospect {
                    pos,
                    safe_sides: sides,
                });
            }
            2 => tiers[2].push(Prospect {
                pos,
                safe_sides: Vec::new(),
            }),
            _ => {}
        }
    }

    tiers
}

/// Picks the computer's next square. `None` only when the board is full.
pub fn choose<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Choice> {
    let tiers = tiers(board);
    let (tier, options) = tiers
        .iter()
        .enumerate()
        .find(|(_, options)| !options.is_empty())?;

    let option = options.choose(rng)?;
    let side = option.safe_sides.choose(rng).copied();

    debug!(
        tier,
        candidates = options.len(),
        row = option.pos.row,
        col = option.pos.col,
        ?side,
        "computer chose square"
    );

    Some(Choice {
        pos: option.pos,
        side,
        tier,
    })
}
