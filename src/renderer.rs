use crate::game::Game;
use crate::layout::Point;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Pointer position in layout coordinates.
    PointerMove(Point),
    Click(Point),
    Quit,
}

/// Trait that abstracts rendering implementation.
/// This allows for different rendering backends (CLI, Web, etc.)
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self) -> io::Result<()>;

    /// Draw the current game state. Must not change it.
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;

    /// Poll for input from the user
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}

/// Routes one input to the game. Returns false when the user asked to quit.
pub fn dispatch(game: &mut Game, input: Input) -> bool {
    match input {
        Input::PointerMove(at) => game.pointer_move(at),
        Input::Click(at) => {
            game.click(at);
        }
        Input::Quit => return false,
    }
    true
}
