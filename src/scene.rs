//! Read-only view of a game as an ordered list of draw commands.
//!
//! Backends replay the commands in order (painter's algorithm) and map each
//! [`Paint`] to a concrete colour of their own.

use crate::board::{Player, Side};
use crate::game::Game;
use crate::layout::{Point, Rect};

pub const TEXT_HUMAN: &str = "Player";
pub const TEXT_HUMAN_SMALL: &str = "Play";
pub const TEXT_COMPUTER: &str = "Computer";
pub const TEXT_COMPUTER_SMALL: &str = "Comp";
pub const TEXT_TIE: &str = "DRAW!";
pub const TEXT_WIN: &str = "WINS!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    Board,
    Border,
    Dot,
    Human,
    HumanLit,
    Computer,
    ComputerLit,
    Tie,
}

impl Paint {
    pub fn of(player: Player, light: bool) -> Paint {
        match (player, light) {
            (Player::Human, false) => Paint::Human,
            (Player::Human, true) => Paint::HumanLit,
            (Player::Computer, false) => Paint::Computer,
            (Player::Computer, true) => Paint::ComputerLit,
        }
    }
}

pub fn player_name(player: Player, small: bool) -> &'static str {
    match (player, small) {
        (Player::Human, false) => TEXT_HUMAN,
        (Player::Human, true) => TEXT_HUMAN_SMALL,
        (Player::Computer, false) => TEXT_COMPUTER,
        (Player::Computer, true) => TEXT_COMPUTER_SMALL,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect { rect: Rect, paint: Paint },
    StrokeRect { rect: Rect, paint: Paint },
    Line { from: Point, to: Point, paint: Paint },
    Dot { center: Point, radius: f64, paint: Paint },
    /// Text centred on `at`.
    Text {
        text: String,
        at: Point,
        size: f64,
        paint: Paint,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub stroke: f64,
    pub commands: Vec<DrawCmd>,
}

pub fn compose(game: &Game) -> Scene {
    let layout = &game.layout;
    let mut commands = Vec::new();

    // Board
    let bounds = layout.bounds();
    commands.push(DrawCmd::FillRect {
        rect: bounds,
        paint: Paint::Board,
    });
    commands.push(DrawCmd::StrokeRect {
        rect: bounds.inset(layout.stroke / 2.0),
        paint: Paint::Border,
    });

    // Squares
    let cell_text = layout.cell_h / 3.0;
    for square in game.board.squares() {
        let rect = layout.square_rect(square.pos);

        if let Some(side) = square.highlight {
            commands.push(side_line(&rect, side, Paint::of(game.turn, true)));
        }
        for side in Side::ALL {
            if let Some(owner) = game.board.side_edge(square.pos, side).owner() {
                commands.push(side_line(&rect, side, Paint::of(owner, false)));
            }
        }

        if let Some(owner) = square.owner {
            commands.push(DrawCmd::FillRect {
                rect: rect.inset(layout.stroke),
                paint: Paint::of(owner, true),
            });
            commands.push(DrawCmd::Text {
                text: player_name(owner, true).to_string(),
                at: rect.center(),
                size: cell_text,
                paint: Paint::of(owner, false),
            });
        }
    }

    // Grid dots
    for line_row in 0..=layout.grid_size {
        for line_col in 0..=layout.grid_size {
            commands.push(DrawCmd::Dot {
                center: Point::new(layout.grid_x(line_col), layout.grid_y(line_row)),
                radius: layout.dot_radius,
                paint: Paint::Dot,
            });
        }
    }

    // Scores
    let margin = layout.margin();
    let top_text = margin / 6.0;
    for (player, x) in [
        (Player::Human, layout.width * 0.25),
        (Player::Computer, layout.width * 0.75),
    ] {
        let paint = Paint::of(player, game.turn != player);
        commands.push(text(player_name(player, false), x, margin * 0.25, top_text, paint));
        commands.push(text(
            &game.score(player).to_string(),
            x,
            margin * 0.6,
            top_text * 2.0,
            paint,
        ));
    }

    // Banner
    if game.is_over() {
        let mid = layout.width * 0.5;
        match game.winner() {
            None => commands.push(text(TEXT_TIE, mid, margin * 0.6, top_text, Paint::Tie)),
            Some(winner) => {
                let paint = Paint::of(winner, false);
                commands.push(text(player_name(winner, false), mid, margin * 0.5, top_text, paint));
                commands.push(text(TEXT_WIN, mid, margin * 0.7, top_text, paint));
            }
        }
    }

    Scene {
        width: layout.width,
        height: layout.height,
        stroke: layout.stroke,
        commands,
    }
}

fn side_line(rect: &Rect, side: Side, paint: Paint) -> DrawCmd {
    let (from, to) = rect.segment(side);
    DrawCmd::Line { from, to, paint }
}

fn text(text: &str, x: f64, y: f64, size: f64, paint: Paint) -> DrawCmd {
    DrawCmd::Text {
        text: text.to_string(),
        at: Point::new(x, y),
        size,
        paint,
    }
}
