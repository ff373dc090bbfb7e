use super::{Cell, Coord, MoveError, Player};
use crate::ai::Speculate;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CENTER_COL: usize = COLS / 2;

/// Every run of four on the grid: horizontal, vertical, `\` diagonal, `/`
/// diagonal, in that order.
pub const WIN_LINES: [[Coord; 4]; 69] = build_win_lines();

const fn run(row: usize, col: usize, d_row: isize, d_col: isize) -> [Coord; 4] {
    let mut cells = [Coord::new(0, 0); 4];
    let mut i = 0;
    while i < 4 {
        cells[i] = Coord::new(
            (row as isize + d_row * i as isize) as usize,
            (col as isize + d_col * i as isize) as usize,
        );
        i += 1;
    }
    cells
}

const fn build_win_lines() -> [[Coord; 4]; 69] {
    let mut lines = [[Coord::new(0, 0); 4]; 69];
    let mut n = 0;

    let mut c = 0;
    while c < COLS - 3 {
        let mut r = 0;
        while r < ROWS {
            lines[n] = run(r, c, 0, 1);
            n += 1;
            r += 1;
        }
        c += 1;
    }

    let mut c = 0;
    while c < COLS {
        let mut r = 0;
        while r < ROWS - 3 {
            lines[n] = run(r, c, 1, 0);
            n += 1;
            r += 1;
        }
        c += 1;
    }

    let mut c = 0;
    while c < COLS - 3 {
        let mut r = 0;
        while r < ROWS - 3 {
            lines[n] = run(r, c, 1, 1);
            n += 1;
            r += 1;
        }
        c += 1;
    }

    let mut c = 0;
    while c < COLS - 3 {
        let mut r = 3;
        while r < ROWS {
            lines[n] = run(r, c, -1, 1);
            n += 1;
            r += 1;
        }
        c += 1;
    }

    assert!(n == 69);
    lines
}

/// Connect Four grid with gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Columns that can still take a piece, ascending.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Lowest empty row of a column
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::OutOfRange(col));
        }
        let row = self.next_open_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Remove the topmost piece of a column, returns the row it was taken from
    pub fn lift_piece(&mut self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        let row = (0..ROWS).find(|&row| self.cells[row][col] != Cell::Empty)?;
        self.cells[row][col] = Cell::Empty;
        Some(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// First run of four held by `player`, in `WIN_LINES` order.
    pub fn winning_line(&self, player: Player) -> Option<[Coord; 4]> {
        let cell = player.to_cell();
        WIN_LINES
            .iter()
            .find(|line| line.iter().all(|c| self.cells[c.row][c.col] == cell))
            .copied()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Speculate for Board {
    type Move = usize;

    fn candidate_moves(&self) -> Vec<usize> {
        self.legal_moves()
    }

    fn place(&mut self, col: usize, player: Player) -> bool {
        self.drop_piece(col, player.to_cell()).is_ok()
    }

    fn retract(&mut self, col: usize) {
        self.lift_piece(col);
    }

    fn has_won(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    fn preferred_move(&self) -> usize {
        CENTER_COL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        // Drop first piece in column 3
        let row = board.drop_piece(3, Cell::One).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.get(5, 3), Cell::One);

        // Drop second piece in same column
        let row = board.drop_piece(3, Cell::Two).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.get(4, 3), Cell::Two);
    }

    #[test]
    fn test_lift_piece_takes_topmost() {
        let mut board = Board::new();
        board.drop_piece(2, Cell::One).unwrap();
        board.drop_piece(2, Cell::Two).unwrap();

        assert_eq!(board.lift_piece(2), Some(4));
        assert_eq!(board.get(4, 2), Cell::Empty);
        assert_eq!(board.get(5, 2), Cell::One);
        assert_eq!(board.lift_piece(2), Some(5));
        assert_eq!(board.lift_piece(2), None);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();

        // Fill column 0
        for _ in 0..ROWS {
            board.drop_piece(0, Cell::One).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(board.drop_piece(0, Cell::Two), Err(MoveError::ColumnFull(0)));
        assert!(!board.legal_moves().contains(&0));
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(7, Cell::One), Err(MoveError::OutOfRange(7)));
        assert!(board.is_column_full(7));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, Cell::One).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_win_lines_are_distinct_runs_of_four() {
        for (i, line) in WIN_LINES.iter().enumerate() {
            for c in line {
                assert!(c.row < ROWS && c.col < COLS, "line {i} leaves the grid");
            }
            let d_row = line[1].row as isize - line[0].row as isize;
            let d_col = line[1].col as isize - line[0].col as isize;
            for w in line.windows(2) {
                assert_eq!(w[1].row as isize - w[0].row as isize, d_row);
                assert_eq!(w[1].col as isize - w[0].col as isize, d_col);
            }
            for other in &WIN_LINES[i + 1..] {
                assert_ne!(line, other);
            }
        }
    }

    #[test]
    fn test_every_line_is_detected() {
        for line in WIN_LINES {
            let mut board = Board::new();
            for c in line {
                board.cells[c.row][c.col] = Cell::Two;
            }
            assert_eq!(board.winning_line(Player::Two), Some(line));
            assert_eq!(board.winning_line(Player::One), None);
        }
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        // Create horizontal line at bottom row
        for col in 0..4 {
            board.drop_piece(col, Cell::One).unwrap();
        }
        let line = board.winning_line(Player::One).unwrap();
        assert_eq!(line, [Coord::new(5, 0), Coord::new(5, 1), Coord::new(5, 2), Coord::new(5, 3)]);
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        // Create vertical line in column 3
        for _ in 0..4 {
            board.drop_piece(3, Cell::Two).unwrap();
        }
        assert!(board.winning_line(Player::Two).is_some());
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new();
        // Create diagonal / pattern
        board.drop_piece(0, Cell::One).unwrap();

        board.drop_piece(1, Cell::Two).unwrap();
        board.drop_piece(1, Cell::One).unwrap();

        board.drop_piece(2, Cell::Two).unwrap();
        board.drop_piece(2, Cell::Two).unwrap();
        board.drop_piece(2, Cell::One).unwrap();

        board.drop_piece(3, Cell::Two).unwrap();
        board.drop_piece(3, Cell::Two).unwrap();
        board.drop_piece(3, Cell::Two).unwrap();
        board.drop_piece(3, Cell::One).unwrap();

        let line = board.winning_line(Player::One).unwrap();
        assert_eq!(line[0], Coord::new(5, 0));
        assert_eq!(line[3], Coord::new(2, 3));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, Cell::One).unwrap();
        }
        assert_eq!(board.winning_line(Player::One), None);
    }
}
