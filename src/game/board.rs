use std::fmt;

use crate::error::GameError;

use super::player::PlayerIdentity;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Length of a run that wins the game.
pub const WIN_LENGTH: usize = 4;

/// Axis directions checked for a win: horizontal, vertical, `/` and `\`.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (-1, 1), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    SideA,
    SideB,
}

/// A cell on the board. Row 0 is the top, row `ROWS - 1` the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Position { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, col {})", self.row, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
    /// Number of filled cells in each column, counted from the bottom.
    fill: [usize; COLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
            fill: [0; COLS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Number of pieces already in a column. Out-of-range columns report 0.
    pub fn fill(&self, col: usize) -> usize {
        self.fill.get(col).copied().unwrap_or(0)
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.fill[col] == ROWS
    }

    /// Columns that can still take a piece, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Drop a piece for `player` into `col` and return where it landed.
    ///
    /// Fails without touching the board when the column is out of range or
    /// already full.
    pub fn place(&mut self, col: usize, player: &PlayerIdentity) -> Result<Position, GameError> {
        if col >= COLS {
            return Err(GameError::ColumnOutOfRange { column: col });
        }
        if self.fill[col] == ROWS {
            return Err(GameError::ColumnFull { column: col });
        }

        self.fill[col] += 1;
        let row = ROWS - self.fill[col];
        self.cells[row][col] = player.to_cell();
        Ok(Position::new(row, col))
    }

    /// Undo the most recent placement in `col`. No-op on an empty column.
    pub fn retract(&mut self, col: usize) {
        if col >= COLS || self.fill[col] == 0 {
            return;
        }
        let row = ROWS - self.fill[col];
        self.cells[row][col] = Cell::Empty;
        self.fill[col] -= 1;
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.fill.iter().all(|&filled| filled == ROWS)
    }

    /// Clear every cell and fill counter.
    pub fn reset(&mut self) {
        *self = Board::new();
    }

    /// Check if the piece `player` just placed at `pos` completes a run of
    /// four along any axis.
    pub fn is_winning_move(&self, pos: Position, player: &PlayerIdentity) -> bool {
        if pos.row >= ROWS || pos.column >= COLS {
            return false;
        }
        let cell = player.to_cell();
        if self.cells[pos.row][pos.column] != cell {
            return false;
        }

        AXES.iter().any(|&(dr, dc)| {
            1 + self.run_length(pos, dr, dc, cell) + self.run_length(pos, -dr, -dc, cell)
                >= WIN_LENGTH
        })
    }

    /// Count consecutive `cell`s stepping away from `pos` by `(dr, dc)`,
    /// not counting `pos` itself.
    fn run_length(&self, pos: Position, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = pos.row as isize + dr;
        let mut c = pos.column as isize + dc;
        while r >= 0
            && r < ROWS as isize
            && c >= 0
            && c < COLS as isize
            && self.cells[r as usize][c as usize] == cell
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Role;

    fn side_a() -> PlayerIdentity {
        PlayerIdentity::new("Red", Role::SideA)
    }

    fn side_b() -> PlayerIdentity {
        PlayerIdentity::new("Yellow", Role::SideB)
    }

    /// Every cell agrees with its column's fill counter.
    fn assert_fill_invariant(board: &Board) {
        for col in 0..COLS {
            for row in 0..ROWS {
                let occupied = board.get(row, col) != Cell::Empty;
                assert_eq!(occupied, row >= ROWS - board.fill(col), "row {row} col {col}");
            }
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.legal_columns(), (0..COLS).collect::<Vec<_>>());
    }

    #[test]
    fn test_place() {
        let mut board = Board::new();

        let pos = board.place(3, &side_a()).unwrap();
        assert_eq!(pos, Position::new(5, 3)); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::SideA);

        let pos = board.place(3, &side_b()).unwrap();
        assert_eq!(pos, Position::new(4, 3)); // Lands on top of the first piece
        assert_eq!(board.get(4, 3), Cell::SideB);
        assert_eq!(board.fill(3), 2);
        assert_fill_invariant(&board);
    }

    #[test]
    fn test_heuristic_places_second_marker() {
        let mut board = Board::new();
        let computer = PlayerIdentity::new("Computer", Role::Heuristic);
        board.place(0, &computer).unwrap();
        assert_eq!(board.get(5, 0), Cell::SideB);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.place(0, &side_a()).unwrap();
        }

        assert!(board.is_column_full(0));
        let before = board.clone();
        assert_eq!(
            board.place(0, &side_b()),
            Err(GameError::ColumnFull { column: 0 })
        );
        assert_eq!(board, before);
        assert!(!board.legal_columns().contains(&0));
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(
            board.place(7, &side_a()),
            Err(GameError::ColumnOutOfRange { column: 7 })
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_retract_restores_board() {
        let mut board = Board::new();
        board.place(2, &side_a()).unwrap();
        board.place(2, &side_b()).unwrap();
        let before = board.clone();

        board.place(2, &side_a()).unwrap();
        board.retract(2);
        assert_eq!(board, before);
        assert_fill_invariant(&board);
    }

    #[test]
    fn test_retract_empty_column_is_noop() {
        let mut board = Board::new();
        board.retract(4);
        board.retract(COLS + 1);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                assert!(!board.is_full());
                board.place(col, &side_a()).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_columns().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new();
        board.place(1, &side_a()).unwrap();
        board.place(6, &side_b()).unwrap();
        board.reset();
        assert_eq!(board, Board::new());
        assert_eq!(board.fill(1), 0);
    }

    #[test]
    fn test_horizontal_win_at_every_cell() {
        let mut board = Board::new();
        for col in 0..4 {
            board.place(col, &side_a()).unwrap();
        }
        for col in 0..4 {
            assert!(board.is_winning_move(Position::new(5, col), &side_a()));
            assert!(!board.is_winning_move(Position::new(5, col), &side_b()));
        }
    }

    #[test]
    fn test_horizontal_win_on_right_edge() {
        let mut board = Board::new();
        for col in 3..COLS {
            board.place(col, &side_a()).unwrap();
        }
        assert!(board.is_winning_move(Position::new(5, 6), &side_a()));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        let mut last = None;
        for _ in 0..4 {
            last = Some(board.place(3, &side_b()).unwrap());
        }
        assert_eq!(last, Some(Position::new(2, 3)));
        // The run is checked in both directions, so every piece in it sees it.
        for row in 2..ROWS {
            assert!(board.is_winning_move(Position::new(row, 3), &side_b()));
        }
        assert!(!board.is_winning_move(Position::new(2, 3), &side_a()));
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new();
        // Create diagonal / pattern
        board.place(0, &side_a()).unwrap();

        board.place(1, &side_b()).unwrap();
        board.place(1, &side_a()).unwrap();

        board.place(2, &side_b()).unwrap();
        board.place(2, &side_b()).unwrap();
        board.place(2, &side_a()).unwrap();

        board.place(3, &side_b()).unwrap();
        board.place(3, &side_b()).unwrap();
        board.place(3, &side_b()).unwrap();
        let pos = board.place(3, &side_a()).unwrap();

        assert_eq!(pos, Position::new(2, 3));
        for i in 0..4 {
            assert!(board.is_winning_move(Position::new(5 - i, i), &side_a()));
        }
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new();
        // Create diagonal \ pattern
        board.place(6, &side_a()).unwrap();

        board.place(5, &side_b()).unwrap();
        board.place(5, &side_a()).unwrap();

        board.place(4, &side_b()).unwrap();
        board.place(4, &side_b()).unwrap();
        board.place(4, &side_a()).unwrap();

        board.place(3, &side_b()).unwrap();
        board.place(3, &side_b()).unwrap();
        board.place(3, &side_b()).unwrap();
        let pos = board.place(3, &side_a()).unwrap();

        assert_eq!(pos, Position::new(2, 3));
        for i in 0..4 {
            assert!(board.is_winning_move(Position::new(5 - i, 6 - i), &side_a()));
        }
        assert!(!board.is_winning_move(pos, &side_b()));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place(col, &side_a()).unwrap();
        }
        assert!(!board.is_winning_move(Position::new(5, 1), &side_a())); // Only 3 in a row
    }

    #[test]
    fn test_broken_run_is_not_a_win() {
        let mut board = Board::new();
        board.place(0, &side_a()).unwrap();
        board.place(1, &side_a()).unwrap();
        board.place(2, &side_b()).unwrap();
        board.place(3, &side_a()).unwrap();
        board.place(4, &side_a()).unwrap();
        assert!(!board.is_winning_move(Position::new(5, 4), &side_a()));
    }

    #[test]
    fn test_run_longer_than_four_wins() {
        let mut board = Board::new();
        for col in [0, 1, 3, 4] {
            board.place(col, &side_a()).unwrap();
        }
        let pos = board.place(2, &side_a()).unwrap();
        assert!(board.is_winning_move(pos, &side_a()));
    }

    #[test]
    fn test_empty_position_is_not_a_win() {
        let board = Board::new();
        assert!(!board.is_winning_move(Position::new(5, 0), &side_a()));
        assert!(!board.is_winning_move(Position::new(ROWS, 0), &side_a()));
    }
}
