use crate::board::{Board, Player};
use crate::config::Config;
use crate::hit_test::{self, MoveCandidate};
use crate::layout::{Layout, Point};
use crate::opponent;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    GameOver,
}

/// What a call to [`Game::apply_move`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Edges newly claimed (0 or 1).
    pub claimed: usize,
    /// Squares closed by this move (0, 1 or 2).
    pub completed: usize,
    pub turn_passed: bool,
    pub game_over: bool,
}

impl MoveOutcome {
    /// A move counts only if it claimed something.
    pub fn accepted(&self) -> bool {
        self.claimed > 0
    }
}

pub struct Game {
    pub config: Config,
    pub layout: Layout,
    pub board: Board,
    pub turn: Player,
    pub score_human: u32,
    pub score_computer: u32,
    /// Highlighted move: the human's pointer target, or the computer's pick
    /// while it thinks.
    pub pending: MoveCandidate,
    pub computer_think_ticks: u32,
    /// Non-zero while the end-of-game banner is up.
    pub game_over_ticks: u32,
    rng: StdRng,
}

impl Game {
    pub fn new(config: Config, layout: Layout) -> Self {
        Self::with_rng(config, layout, StdRng::from_entropy())
    }

    pub fn seeded(config: Config, layout: Layout, seed: u64) -> Self {
        Self::with_rng(config, layout, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: Config, layout: Layout, rng: StdRng) -> Self {
        debug_assert_eq!(config.grid_size, layout.grid_size);

        let mut game = Self {
            board: Board::new(config.grid_size),
            config,
            layout,
            turn: Player::Human,
            score_human: 0,
            score_computer: 0,
            pending: MoveCandidate::default(),
            computer_think_ticks: 0,
            game_over_ticks: 0,
            rng,
        };
        game.new_game();
        game
    }

    /// Throws away the current board and starts over with a random first player.
    pub fn new_game(&mut self) {
        self.board = Board::new(self.config.grid_size);
        self.turn = if self.rng.gen_bool(0.5) {
            Player::Human
        } else {
            Player::Computer
        };
        self.score_human = 0;
        self.score_computer = 0;
        self.pending.clear();
        self.computer_think_ticks = 0;
        self.game_over_ticks = 0;

        info!(grid_size = self.config.grid_size, first = ?self.turn, "new game");
    }

    pub fn state(&self) -> GameState {
        if self.game_over_ticks > 0 {
            GameState::GameOver
        } else {
            GameState::InProgress
        }
    }

    pub fn is_over(&self) -> bool {
        self.state() == GameState::GameOver
    }

    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::Human => self.score_human,
            Player::Computer => self.score_computer,
        }
    }

    fn score_mut(&mut self, player: Player) -> &mut u32 {
        match player {
            Player::Human => &mut self.score_human,
            Player::Computer => &mut self.score_computer,
        }
    }

    pub fn total_squares(&self) -> u32 {
        (self.config.grid_size * self.config.grid_size) as u32
    }

    /// The leader, or `None` on a tie.
    pub fn winner(&self) -> Option<Player> {
        match self.score_human.cmp(&self.score_computer) {
            std::cmp::Ordering::Greater => Some(Player::Human),
            std::cmp::Ordering::Less => Some(Player::Computer),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Re-highlights under the pointer. Only the human's pointer counts.
    pub fn pointer_move(&mut self, at: Point) {
        if self.turn != Player::Human || self.is_over() {
            return;
        }
        self.pending = hit_test::highlight(&mut self.board, &self.layout, at);
    }

    /// Commits the highlighted move. The click position itself is not
    /// hit-tested again; whatever the last pointer move highlighted is used.
    pub fn click(&mut self, _at: Point) -> Option<MoveOutcome> {
        if self.turn != Player::Human || self.is_over() || self.pending.is_empty() {
            return None;
        }
        let candidate = std::mem::take(&mut self.pending);
        Some(self.apply_move(&candidate))
    }

    /// Claims the candidate's edge for the player whose turn it is, scores
    /// any squares it closes, and passes the turn if none were closed.
    pub fn apply_move(&mut self, candidate: &MoveCandidate) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        let player = self.turn;

        for target in candidate.targets() {
            if self.board.claim(target.pos, target.side, player) {
                outcome.claimed += 1;
                debug!(
                    ?player,
                    row = target.pos.row,
                    col = target.pos.col,
                    side = ?target.side,
                    "edge claimed"
                );
            }
        }

        self.pending.clear();
        self.board.clear_highlights();

        // Nothing new was claimed: a stale or empty candidate is not a move.
        if !outcome.accepted() {
            return outcome;
        }

        for target in candidate.targets() {
            let open = self.board.square(target.pos).owner.is_none();
            if open && self.board.completion_count(target.pos) == 4 {
                self.board.square_mut(target.pos).owner = Some(player);
                *self.score_mut(player) += 1;
                outcome.completed += 1;
            }
        }

        if outcome.completed == 0 {
            self.turn = self.turn.other();
            outcome.turn_passed = true;
        }

        if self.score_human + self.score_computer == self.total_squares() {
            self.game_over_ticks = self.config.game_over_ticks();
            outcome.game_over = true;
            info!(
                human = self.score_human,
                computer = self.score_computer,
                winner = ?self.winner(),
                "game over"
            );
        }

        outcome
    }

    /// One fixed-rate step. The host renders before calling this.
    pub fn tick(&mut self) {
        if self.game_over_ticks > 0 {
            self.game_over_ticks -= 1;
            if self.game_over_ticks == 0 {
                self.new_game();
            }
        }
        self.go_computer();
    }

    /// Either counts down the computer's pending move and commits it, or
    /// picks and highlights a new one.
    pub fn go_computer(&mut self) {
        if self.turn != Player::Computer || self.is_over() {
            return;
        }

        if self.computer_think_ticks > 0 {
            self.computer_think_ticks -= 1;
            if self.computer_think_ticks == 0 {
                let candidate = std::mem::take(&mut self.pending);
                self.apply_move(&candidate);
            }
            return;
        }

        let Some(choice) = opponent::choose(&self.board, &mut self.rng) else {
            return;
        };
        let Some(at) = hit_test::side_point(
            &self.board,
            &self.layout,
            choice.pos,
            choice.side,
            &mut self.rng,
        ) else {
            return;
        };

        self.pending = hit_test::highlight(&mut self.board, &self.layout, at);
        self.computer_think_ticks = self.config.think_ticks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{EdgeId, Side, SquarePos};
    use proptest::prelude::*;

    fn layout(grid_size: usize) -> Layout {
        Layout {
            grid_size,
            width: 20.0 + 10.0 * grid_size as f64,
            height: 20.0 + 10.0 * grid_size as f64,
            origin_x: 10.0,
            origin_y: 10.0,
            cell_w: 10.0,
            cell_h: 10.0,
            stroke: 1.0,
            dot_radius: 1.0,
        }
    }

    fn new_game(grid_size: usize, first: Player) -> Game {
        let config = Config {
            grid_size,
            ..Config::default()
        };
        let mut game = Game::seeded(config, layout(grid_size), 0);
        game.turn = first;
        game
    }

    fn probe(game: &Game, row: usize, col: usize, side: Side) -> Point {
        game.layout.square_rect(SquarePos::new(row, col)).probe(side)
    }

    /// Hit-tests and applies a move for whoever's turn it is.
    fn play(game: &mut Game, row: usize, col: usize, side: Side) -> MoveOutcome {
        let at = probe(game, row, col, side);
        let candidate = hit_test::locate(&game.board, &game.layout, at);
        game.apply_move(&candidate)
    }

    fn edge_owners(board: &Board) -> Vec<Option<Player>> {
        (0..board.edge_count())
            .map(|i| board.edge(EdgeId(i)).owner())
            .collect()
    }

    #[test]
    fn test_first_edge_passes_turn() {
        let mut game = new_game(2, Player::Human);
        let pos = SquarePos::new(0, 0);

        game.pointer_move(probe(&game, 0, 0, Side::Top));
        assert_eq!(game.pending.len(), 1);
        let outcome = game.click(Point::new(0.0, 0.0)).unwrap();

        assert_eq!(outcome.completed, 0);
        assert!(outcome.turn_passed);
        assert!(game.board.is_claimed(pos, Side::Top));
        assert_eq!(game.board.side_edge(pos, Side::Top).owner(), Some(Player::Human));
        assert_eq!(game.turn, Player::Computer);
        assert!(game.pending.is_empty());
    }

    #[test]
    fn test_fourth_edge_scores_and_keeps_turn() {
        let mut game = new_game(2, Player::Human);
        let pos = SquarePos::new(0, 0);
        game.board.claim(pos, Side::Top, Player::Computer);
        game.board.claim(pos, Side::Left, Player::Computer);
        game.board.claim(pos, Side::Bottom, Player::Human);

        let outcome = play(&mut game, 0, 0, Side::Right);

        assert_eq!(outcome.completed, 1);
        assert!(!outcome.turn_passed);
        assert_eq!(game.board.square(pos).owner, Some(Player::Human));
        assert_eq!(game.score_human, 1);
        assert_eq!(game.score_computer, 0);
        assert_eq!(game.turn, Player::Human);
        assert_eq!(game.state(), GameState::InProgress);
    }

    #[test]
    fn test_last_edge_closes_two_squares_and_ends_game() {
        let mut game = new_game(2, Player::Human);
        // The edge between (0, 0) and (0, 1), seen from both sides.
        let shared = [
            (SquarePos::new(0, 0), Side::Right),
            (SquarePos::new(0, 1), Side::Left),
        ];

        let all: Vec<(SquarePos, Side)> = game
            .board
            .squares()
            .flat_map(|s| Side::ALL.into_iter().map(move |side| (s.pos, side)))
            .collect();
        for (pos, side) in all {
            if shared.contains(&(pos, side)) || game.board.is_claimed(pos, side) {
                continue;
            }
            play(&mut game, pos.row, pos.col, side);
        }
        assert_eq!(game.board.free_edge_count(), 1);
        assert_eq!(game.score_human + game.score_computer, 2);
        let before = game.score(game.turn);
        let mover = game.turn;

        let outcome = play(&mut game, 0, 0, Side::Right);

        assert_eq!(outcome.completed, 2);
        assert!(!outcome.turn_passed);
        assert!(outcome.game_over);
        assert_eq!(game.turn, mover);
        assert_eq!(game.score(mover), before + 2);
        assert_eq!(game.board.square(SquarePos::new(0, 0)).owner, Some(mover));
        assert_eq!(game.board.square(SquarePos::new(0, 1)).owner, Some(mover));
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.game_over_ticks, game.config.game_over_ticks());
    }

    #[test]
    fn test_game_over_resets_after_exact_delay() {
        let mut game = new_game(1, Player::Human);
        for side in [Side::Top, Side::Left, Side::Right] {
            game.board.claim(SquarePos::new(0, 0), side, Player::Human);
        }
        let outcome = play(&mut game, 0, 0, Side::Bottom);
        assert!(outcome.game_over);
        assert_eq!(game.winner(), Some(Player::Human));

        let delay = game.config.game_over_ticks();
        for _ in 0..delay - 1 {
            game.tick();
            assert!(game.is_over());
            assert_eq!(game.score_human, 1);
        }
        game.tick();

        assert_eq!(game.state(), GameState::InProgress);
        assert_eq!(game.score_human, 0);
        assert_eq!(game.board.free_edge_count(), game.board.edge_count());
    }

    #[test]
    fn test_input_ignored_when_not_humans_turn() {
        let mut game = new_game(2, Player::Computer);

        game.pointer_move(probe(&game, 0, 0, Side::Top));
        assert!(game.pending.is_empty());
        assert_eq!(game.click(Point::new(15.0, 11.0)), None);
        assert_eq!(game.board.free_edge_count(), game.board.edge_count());
    }

    #[test]
    fn test_input_ignored_while_over() {
        let mut game = new_game(2, Player::Human);
        game.game_over_ticks = 5;

        game.pointer_move(probe(&game, 0, 0, Side::Top));
        assert!(game.pending.is_empty());
        assert_eq!(game.click(Point::new(15.0, 11.0)), None);
    }

    #[test]
    fn test_click_without_highlight_ignored() {
        let mut game = new_game(2, Player::Human);

        assert_eq!(game.click(probe(&game, 0, 0, Side::Top)), None);
        game.pointer_move(Point::new(0.0, 0.0));
        assert_eq!(game.click(Point::new(0.0, 0.0)), None);
        assert_eq!(game.turn, Player::Human);
    }

    #[test]
    fn test_reclaiming_edge_is_noop() {
        let mut game = new_game(2, Player::Human);
        let candidate = hit_test::locate(&game.board, &game.layout, probe(&game, 0, 0, Side::Right));
        game.apply_move(&candidate);
        assert_eq!(game.turn, Player::Computer);

        let outcome = game.apply_move(&candidate);

        assert!(!outcome.accepted());
        assert_eq!(game.turn, Player::Computer);
        assert_eq!(
            game.board.side_edge(SquarePos::new(0, 1), Side::Left).owner(),
            Some(Player::Human)
        );
    }

    #[test]
    fn test_computer_commits_after_think_delay() {
        let mut game = new_game(2, Player::Computer);
        let think = game.config.think_ticks();
        let edges = game.board.edge_count();

        game.tick();
        assert!(!game.pending.is_empty());
        assert_eq!(game.computer_think_ticks, think);
        assert!(game.board.squares().any(|s| s.highlight.is_some()));

        for _ in 0..think - 1 {
            game.tick();
            assert_eq!(game.board.free_edge_count(), edges);
        }
        game.tick();

        assert_eq!(game.board.free_edge_count(), edges - 1);
        assert_eq!(game.turn, Player::Human);
        assert!(game.pending.is_empty());
    }

    #[test]
    fn test_computer_takes_free_square() {
        let mut game = new_game(3, Player::Computer);
        let pos = SquarePos::new(1, 1);
        for side in [Side::Top, Side::Left, Side::Bottom] {
            game.board.claim(pos, side, Player::Human);
        }

        for _ in 0..=game.config.think_ticks() {
            game.tick();
        }

        assert_eq!(game.board.square(pos).owner, Some(Player::Computer));
        assert_eq!(game.score_computer, 1);
        assert_eq!(game.turn, Player::Computer);
    }

    #[test]
    fn test_same_seed_same_game() {
        let config = Config {
            grid_size: 3,
            ..Config::default()
        };
        let mut a = Game::seeded(config.clone(), layout(3), 99);
        let mut b = Game::seeded(config, layout(3), 99);
        assert_eq!(a.turn, b.turn);

        a.turn = Player::Computer;
        b.turn = Player::Computer;
        a.tick();
        b.tick();
        assert_eq!(a.pending, b.pending);
    }

    proptest! {
        /// Plays whole games, human moves drawn from a seeded rng, and checks
        /// the scoring and turn rules after every step.
        #[test]
        fn prop_full_game_rules_hold(seed in any::<u64>(), grid_size in 1usize..4) {
            let config = Config { grid_size, ..Config::default() };
            let mut game = Game::seeded(config, layout(grid_size), seed);
            let mut picker = StdRng::seed_from_u64(seed ^ 0x5eed);

            let mut steps = 0;
            while !game.is_over() {
                steps += 1;
                prop_assert!(steps < 20_000, "game never finished");

                let owners = edge_owners(&game.board);
                let score = game.score_human + game.score_computer;
                let turn = game.turn;

                let outcome = match game.turn {
                    Player::Human => {
                        let open: Vec<(SquarePos, Side)> = game
                            .board
                            .squares()
                            .flat_map(|s| Side::ALL.into_iter().map(move |side| (s.pos, side)))
                            .filter(|(pos, side)| !game.board.is_claimed(*pos, *side))
                            .collect();
                        let (pos, side) = open[picker.gen_range(0..open.len())];
                        game.pointer_move(probe(&game, pos.row, pos.col, side));
                        game.click(Point::new(0.0, 0.0))
                    }
                    Player::Computer => {
                        let free = game.board.free_edge_count();
                        game.tick();
                        (game.board.free_edge_count() < free).then(|| MoveOutcome {
                            claimed: 1,
                            completed: (game.score_human + game.score_computer - score) as usize,
                            turn_passed: game.turn != turn,
                            game_over: game.is_over(),
                        })
                    }
                };

                for (before, after) in owners.iter().zip(edge_owners(&game.board)) {
                    if before.is_some() {
                        prop_assert_eq!(*before, after);
                    }
                }

                let now = game.score_human + game.score_computer;
                prop_assert_eq!(now as usize, game.board.owned_count());

                match outcome {
                    Some(outcome) if outcome.accepted() => {
                        prop_assert_eq!(now - score, outcome.completed as u32);
                        prop_assert!(outcome.completed <= 2);
                        prop_assert_eq!(game.turn != turn, outcome.completed == 0);
                    }
                    _ => {
                        prop_assert_eq!(now, score);
                        prop_assert_eq!(game.turn, turn);
                    }
                }
            }

            prop_assert_eq!(game.score_human + game.score_computer, game.total_squares());
            prop_assert_eq!(game.board.free_edge_count(), 0);
        }
    }
}
