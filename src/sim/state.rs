//! Game state and core simulation types
//!
//! Positions are grid-aligned design-space coordinates. Projection to
//! device pixels happens in [`crate::layout`] at draw time only.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Grid-aligned point in design space
pub type Point = IVec2;

/// Movement direction (also the input intent type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector (screen coordinates, +y is down)
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// Displacement of one tick: the unit vector scaled by the cell size
    pub fn step(self) -> IVec2 {
        self.unit() * CELL_SIZE
    }
}

/// Rectangle the snake lives in. High edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayArea {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::DESIGN
    }
}

impl PlayArea {
    /// The play area of the 920x720 design resolution
    pub const DESIGN: PlayArea = PlayArea {
        x1: PLAY_AREA_X1,
        y1: PLAY_AREA_Y1,
        x2: PLAY_AREA_X2,
        y2: PLAY_AREA_Y2,
    };

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Closed on the low side, open on the high side
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.y >= self.y1 && p.x < self.x2 && p.y < self.y2
    }

    /// Number of grid columns a cell can start in (partial last column counts)
    pub fn columns(&self) -> i32 {
        (self.width() + CELL_SIZE - 1) / CELL_SIZE
    }

    /// Number of grid rows a cell can start in (partial last row counts)
    pub fn rows(&self) -> i32 {
        (self.height() + CELL_SIZE - 1) / CELL_SIZE
    }

    /// Top-left corner of the cell at (column, row)
    pub fn cell(&self, column: i32, row: i32) -> Point {
        self.origin() + IVec2::new(column, row) * CELL_SIZE
    }

    /// Whether a point sits on the grid anchored at the origin
    pub fn is_aligned(&self, p: Point) -> bool {
        (p.x - self.x1) % CELL_SIZE == 0 && (p.y - self.y1) % CELL_SIZE == 0
    }
}

/// Complete per-round game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Body segments, head first. Never empty.
    pub snake: Vec<Point>,
    /// Direction applied on the last tick
    pub direction: Direction,
    /// Most recently accepted intent, applied on the next tick
    pub pending: Direction,
    pub food: Point,
    pub score: u32,
    pub running: bool,
    /// Countdown value shown before the round starts
    pub countdown: i32,
    pub play_area: PlayArea,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh (not running) round with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            snake: Vec::new(),
            direction: Direction::Right,
            pending: Direction::Right,
            food: Point::ZERO,
            score: 0,
            running: false,
            countdown: COUNTDOWN_FROM,
            play_area: PlayArea::DESIGN,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Build a state with an explicit body and direction (scenarios, demos)
    pub fn with_snake(seed: u64, snake: Vec<Point>, direction: Direction) -> Self {
        let mut state = Self::new(seed);
        if !snake.is_empty() {
            state.snake = snake;
        }
        state.direction = direction;
        state.pending = direction;
        state
    }

    /// Fresh snake, food and score. Keeps the RNG stream going.
    pub fn reset(&mut self) {
        let spawn = self.play_area.cell(SPAWN_OFFSET_CELLS, SPAWN_OFFSET_CELLS);
        self.snake.clear();
        self.snake.push(spawn);
        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.running = false;
        self.place_food();
    }

    pub fn head(&self) -> Point {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    /// Move food to a uniformly random grid cell inside the play area.
    ///
    /// Cells occupied by the snake are not excluded.
    pub fn place_food(&mut self) {
        let column = self.rng.random_range(0..self.play_area.columns());
        let row = self.rng.random_range(0..self.play_area.rows());
        self.food = self.play_area.cell(column, row);
    }

    /// Request a new direction. Rejected when it reverses the direction
    /// applied on the last tick; otherwise the latest request wins.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir == self.direction.opposite() {
            return false;
        }
        self.pending = dir;
        true
    }
}
