/// One of the four boundary positions of a square.
///
/// The declaration order is the hit-test tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Bottom = 0,
    Left = 1,
    Right = 2,
    Top = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Bottom, Side::Left, Side::Right, Side::Top];

    pub fn opposite(&self) -> Side {
        match self {
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    pub fn other(&self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }
}

/// Grid coordinates of a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquarePos {
    pub row: usize,
    pub col: usize,
}

impl SquarePos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Stable index of an edge in the board's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

/// A boundary segment. Claimed iff it has an owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Edge {
    owner: Option<Player>,
}

impl Edge {
    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }

    pub fn owner(&self) -> Option<Player> {
        self.owner
    }
}

#[derive(Debug, Clone)]
pub struct Square {
    pub pos: SquarePos,
    /// Edge ids indexed by `Side as usize`.
    pub edges: [EdgeId; 4],
    pub owner: Option<Player>,
    /// Transient UI state, not game state.
    pub highlight: Option<Side>,
}

impl Square {
    pub fn edge(&self, side: Side) -> EdgeId {
        self.edges[side as usize]
    }
}

/// N x N grid of squares over a shared edge arena.
///
/// Horizontal edges come first in the arena, `(n + 1) * n` of them, indexed
/// by `line_row * n + col`. Vertical edges follow, `n * (n + 1)` of them,
/// indexed by `row * (n + 1) + line_col`.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    squares: Vec<Square>,
    edges: Vec<Edge>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        let horizontal = (size + 1) * size;
        let vertical = size * (size + 1);
        let edges = vec![Edge::default(); horizontal + vertical];

        let h = |line_row: usize, col: usize| EdgeId(line_row * size + col);
        let v = |row: usize, line_col: usize| EdgeId(horizontal + row * (size + 1) + line_col);

        let mut squares = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let mut ids = [EdgeId(0); 4];
                ids[Side::Bottom as usize] = h(row + 1, col);
                ids[Side::Left as usize] = v(row, col);
                ids[Side::Right as usize] = v(row, col + 1);
                ids[Side::Top as usize] = h(row, col);
                squares.push(Square {
                    pos: SquarePos::new(row, col),
                    edges: ids,
                    owner: None,
                    highlight: None,
                });
            }
        }

        Self {
            size,
            squares,
            edges,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter()
    }

    pub fn square(&self, pos: SquarePos) -> &Square {
        &self.squares[pos.row * self.size + pos.col]
    }

    pub fn square_mut(&mut self, pos: SquarePos) -> &mut Square {
        &mut self.squares[pos.row * self.size + pos.col]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn side_edge(&self, pos: SquarePos, side: Side) -> &Edge {
        self.edge(self.square(pos).edge(side))
    }

    pub fn is_claimed(&self, pos: SquarePos, side: Side) -> bool {
        self.side_edge(pos, side).is_claimed()
    }

    /// Number of claimed edges around a square, always read from the arena.
    pub fn completion_count(&self, pos: SquarePos) -> u8 {
        let square = self.square(pos);
        square
            .edges
            .iter()
            .filter(|id| self.edge(**id).is_claimed())
            .count() as u8
    }

    /// Unclaimed sides of a square, in `Side::ALL` order.
    pub fn free_sides(&self, pos: SquarePos) -> Vec<Side> {
        Side::ALL
            .into_iter()
            .filter(|side| !self.is_claimed(pos, *side))
            .collect()
    }

    /// The square across `side`, or `None` on the perimeter.
    pub fn neighbor_of(&self, pos: SquarePos, side: Side) -> Option<SquarePos> {
        let SquarePos { row, col } = pos;
        match side {
            Side::Bottom if row + 1 < self.size => Some(SquarePos::new(row + 1, col)),
            Side::Left if col > 0 => Some(SquarePos::new(row, col - 1)),
            Side::Right if col + 1 < self.size => Some(SquarePos::new(row, col + 1)),
            Side::Top if row > 0 => Some(SquarePos::new(row - 1, col)),
            _ => None,
        }
    }

    /// Claims the edge on `side` of `pos`. Returns false, changing nothing,
    /// if the edge was already claimed.
    pub fn claim(&mut self, pos: SquarePos, side: Side, player: Player) -> bool {
        let id = self.square(pos).edge(side);
        let edge = &mut self.edges[id.0];
        if edge.is_claimed() {
            return false;
        }
        edge.owner = Some(player);
        true
    }

    pub fn squares_with_count(&self, count: u8) -> Vec<SquarePos> {
        self.squares
            .iter()
            .map(|s| s.pos)
            .filter(|pos| self.completion_count(*pos) == count)
            .collect()
    }

    pub fn free_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| !e.is_claimed()).count()
    }

    pub fn owned_count(&self) -> usize {
        self.squares.iter().filter(|s| s.owner.is_some()).count()
    }

    pub fn clear_highlights(&mut self) {
        for square in &mut self.squares {
            square.highlight = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_internal_edges_shared_by_two_squares() {
        let board = Board::new(5);
        let mut refs: HashMap<EdgeId, usize> = HashMap::new();
        for square in board.squares() {
            for id in square.edges {
                *refs.entry(id).or_default() += 1;
            }
        }

        assert_eq!(refs.len(), board.edge_count());
        let perimeter = refs.values().filter(|n| **n == 1).count();
        let internal = refs.values().filter(|n| **n == 2).count();
        assert_eq!(perimeter, 4 * 5);
        assert_eq!(internal, board.edge_count() - 4 * 5);
    }

    #[test]
    fn test_claim_visible_from_neighbor() {
        let mut board = Board::new(3);
        let a = SquarePos::new(1, 1);

        for side in Side::ALL {
            let b = board.neighbor_of(a, side).unwrap();
            assert!(!board.is_claimed(b, side.opposite()));
            assert!(board.claim(a, side, Player::Human));
            assert!(board.is_claimed(b, side.opposite()));
            assert_eq!(board.side_edge(b, side.opposite()).owner(), Some(Player::Human));
            assert_eq!(board.completion_count(b), 1);
        }
        assert_eq!(board.completion_count(a), 4);
    }

    #[test]
    fn test_claim_twice_keeps_first_owner() {
        let mut board = Board::new(2);
        let pos = SquarePos::new(0, 0);

        assert!(board.claim(pos, Side::Top, Player::Computer));
        assert!(!board.claim(pos, Side::Top, Player::Human));
        assert_eq!(board.side_edge(pos, Side::Top).owner(), Some(Player::Computer));
        assert_eq!(board.completion_count(pos), 1);
    }

    #[test]
    fn test_neighbor_of_perimeter() {
        let board = Board::new(2);
        let corner = SquarePos::new(0, 0);

        assert_eq!(board.neighbor_of(corner, Side::Top), None);
        assert_eq!(board.neighbor_of(corner, Side::Left), None);
        assert_eq!(board.neighbor_of(corner, Side::Right), Some(SquarePos::new(0, 1)));
        assert_eq!(board.neighbor_of(corner, Side::Bottom), Some(SquarePos::new(1, 0)));

        let far = SquarePos::new(1, 1);
        assert_eq!(board.neighbor_of(far, Side::Bottom), None);
        assert_eq!(board.neighbor_of(far, Side::Right), None);
    }

    #[test]
    fn test_free_sides_and_aggregates() {
        let mut board = Board::new(2);
        let pos = SquarePos::new(0, 1);
        let total = board.edge_count();

        board.claim(pos, Side::Left, Player::Human);
        board.claim(pos, Side::Top, Player::Computer);

        assert_eq!(board.free_sides(pos), vec![Side::Bottom, Side::Right]);
        assert_eq!(board.free_edge_count(), total - 2);
        assert_eq!(board.squares_with_count(2), vec![pos]);
        assert_eq!(board.squares_with_count(1), vec![SquarePos::new(0, 0)]);
        assert_eq!(board.owned_count(), 0);
    }
}
