//! Fixed-interval simulation tick
//!
//! One call advances the snake by exactly one cell.

use super::collision::{self, Collision};
use super::state::{Direction, GameState, Point};

/// Per-tick options
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Demo mode - the autopilot steers before the move
    pub autopilot: bool,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Round not running, nothing changed
    Idle,
    /// Snake moved one cell
    Moved,
    /// Snake moved onto the food and grew
    Ate,
    /// Snake moved and the round ended
    Collided(Collision),
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if !state.running {
        return TickOutcome::Idle;
    }

    if input.autopilot {
        if let Some(dir) = autopilot_direction(state) {
            state.steer(dir);
        }
    }

    state.direction = state.pending;
    let head = state.head() + state.direction.step();

    // Eating duplicates the tail; the shift below leaves the copy in place,
    // so the snake is one longer after this tick.
    let ate = head == state.food;
    if ate {
        let tail = state.snake[state.snake.len() - 1];
        state.snake.push(tail);
        state.score += 1;
        state.place_food();
        log::debug!("Food eaten, score {}", state.score);
    }

    state.snake.rotate_right(1);
    state.snake[0] = head;

    if let Some(hit) = collision::detect(&state.play_area, &state.snake) {
        state.running = false;
        log::info!("Round over ({:?}) with score {}", hit, state.score);
        return TickOutcome::Collided(hit);
    }

    if ate { TickOutcome::Ate } else { TickOutcome::Moved }
}

/// Greedy demo steering: the safe direction that gets closest to the food.
///
/// Returns `None` when every option is fatal.
pub fn autopilot_direction(state: &GameState) -> Option<Direction> {
    let head = state.head();
    Direction::ALL
        .into_iter()
        .filter(|&d| d != state.direction.opposite())
        .filter(|&d| is_safe(state, head + d.step()))
        .min_by_key(|&d| manhattan(head + d.step(), state.food))
}

fn is_safe(state: &GameState, next: Point) -> bool {
    if collision::out_of_bounds(&state.play_area, next) {
        return false;
    }
    // The tail moves out of the way unless this move eats
    let body = if next == state.food {
        &state.snake[..]
    } else {
        &state.snake[..state.snake.len() - 1]
    };
    !body.contains(&next)
}

fn manhattan(a: Point, b: Point) -> i32 {
    (a - b).abs().element_sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CELL_SIZE;
    use crate::sim::state::PlayArea;

    fn running(snake: Vec<Point>, direction: Direction) -> GameState {
        let mut state = GameState::with_snake(12345, snake, direction);
        state.running = true;
        // Park food far away so it doesn't interfere
        state.food = PlayArea::DESIGN.cell(30, 20);
        state
    }

    #[test]
    fn test_tick_idle_when_not_running() {
        let mut state = GameState::new(1);
        let before = state.snake.clone();
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Idle);
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_tick_moves_one_cell() {
        let mut state = running(vec![Point::new(238, 209)], Direction::Right);
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Moved);
        assert_eq!(state.snake, vec![Point::new(258, 209)]);
    }

    #[test]
    fn test_tick_shifts_body() {
        let body = vec![
            Point::new(278, 209),
            Point::new(258, 209),
            Point::new(238, 209),
        ];
        let mut state = running(body.clone(), Direction::Right);
        state.steer(Direction::Down);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.head(), Point::new(278, 229));
        assert_eq!(&state.snake[1..], &body[..2]);
        assert_eq!(state.direction, Direction::Down);
    }

    #[test]
    fn test_tick_eats_and_grows() {
        let mut state = running(
            vec![Point::new(238, 209), Point::new(218, 209)],
            Direction::Right,
        );
        state.food = Point::new(258, 209);
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Ate);
        assert_eq!(state.score, 1);
        assert_eq!(
            state.snake,
            vec![
                Point::new(258, 209),
                Point::new(238, 209),
                Point::new(218, 209)
            ]
        );
        assert!(state.play_area.contains(state.food));
    }

    #[test]
    fn test_tick_wall_collision_ends_round() {
        let area = PlayArea::DESIGN;
        let edge = area.cell(area.columns() - 1, 3);
        let mut state = running(vec![edge], Direction::Right);
        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(outcome, TickOutcome::Collided(Collision::Wall));
        assert!(!state.running);
        // Simulation is frozen afterwards
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Idle);
    }

    #[test]
    fn test_tick_top_wall() {
        let mut state = running(vec![PlayArea::DESIGN.origin()], Direction::Up);
        assert_eq!(
            tick(&mut state, &TickInput::default()),
            TickOutcome::Collided(Collision::Wall)
        );
    }

    #[test]
    fn test_tick_self_collision() {
        // Moving left, turning up into a cell the body still holds
        let c = CELL_SIZE;
        let o = PlayArea::DESIGN.cell(5, 5);
        let body = vec![
            o,
            o + Point::new(c, 0),
            o + Point::new(c, -c),
            o + Point::new(0, -c),
            o + Point::new(-c, -c),
        ];
        let mut state = running(body, Direction::Left);
        state.steer(Direction::Up);
        assert_eq!(
            tick(&mut state, &TickInput::default()),
            TickOutcome::Collided(Collision::Body)
        );
    }

    #[test]
    fn test_tail_chasing_is_not_a_collision() {
        // A square of four: the head moves into the cell the tail leaves,
        // but the shift happens before the check so the tail is gone.
        let c = CELL_SIZE;
        let o = PlayArea::DESIGN.cell(5, 5);
        let body = vec![
            o,
            o + Point::new(0, c),
            o + Point::new(c, c),
            o + Point::new(c, 0),
        ];
        let mut state = running(body, Direction::Up);
        state.steer(Direction::Right);
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Moved);
    }

    #[test]
    fn test_autopilot_heads_for_food() {
        let mut state = running(vec![Point::new(238, 209)], Direction::Right);
        state.food = Point::new(238, 269);
        assert_eq!(autopilot_direction(&state), Some(Direction::Down));
    }

    #[test]
    fn test_autopilot_avoids_wall() {
        let area = PlayArea::DESIGN;
        let mut state = running(vec![area.cell(area.columns() - 1, 0)], Direction::Right);
        state.food = area.cell(0, 10);
        let dir = autopilot_direction(&state).expect("a safe move exists");
        assert_eq!(dir, Direction::Down);
    }

    #[test]
    fn test_autopilot_survives_a_while() {
        let mut state = GameState::new(2024);
        state.running = true;
        let input = TickInput { autopilot: true };
        for _ in 0..200 {
            if let TickOutcome::Collided(_) = tick(&mut state, &input) {
                break;
            }
        }
        assert!(state.score > 0);
    }
}
