pub mod board;
pub mod config;
pub mod game;
pub mod layout;
pub mod opponent;
pub mod renderer;
pub mod scene;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;

#[cfg(target_arch = "wasm32")]
pub mod web_main;
#[cfg(target_arch = "wasm32")]
pub mod web_renderer;

pub use board::{Board, Edge, EdgeId, Player, Side, Square, SquarePos};
pub use config::{Config, ConfigError};
pub use game::{Game, GameState, MoveOutcome};
pub use hit_test::{MoveCandidate, Target};
pub use layout::{Layout, Point, Rect};
pub use renderer::{dispatch, Input, Renderer};
pub use scene::{DrawCmd, Paint, Scene};

#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;

#[cfg(target_arch = "wasm32")]
pub use web_renderer::WebRenderer;
