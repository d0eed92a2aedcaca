//! 2D rendering module
//!
//! Drawing goes through the [`Surface`] trait so frames can be produced for
//! a browser canvas or recorded in tests. Renderers only read game state.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::layout::{Layout, Rect};
use crate::sim::GameState;

/// Colors for game elements
pub mod colors {
    pub const BORDER: &str = "#fff";
    pub const SNAKE: &str = "#0f0";
    pub const FOOD: &str = "#f00";
    pub const TEXT: &str = "#fff";
    /// Shown when the background image is unavailable
    pub const BACKGROUND: &str = "#111";
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// Font, color and anchor for one text draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in device pixels
    pub size: f32,
    pub align: TextAlign,
    pub color: &'static str,
}

/// Drawing primitives a frame needs
pub trait Surface {
    /// Clear the whole surface
    fn clear(&mut self, rect: Rect);
    /// Draw the background image stretched over `rect`
    fn draw_background(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect, color: &str);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}

/// What the driver should put on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// Countdown overlay showing this value
    Countdown(i32),
    /// Live board
    Play,
    /// Frozen board with the game-over banner
    GameOver,
}

/// Controls hint shown under the countdown
pub const INSTRUCTIONS: &str = "Use the arrow keys or swipe to steer";

fn score_style(layout: &Layout) -> TextStyle {
    TextStyle {
        size: 20.0 * layout.scale,
        align: TextAlign::Left,
        color: colors::TEXT,
    }
}

fn banner_style(layout: &Layout) -> TextStyle {
    TextStyle {
        size: 48.0 * layout.scale,
        align: TextAlign::Center,
        color: colors::TEXT,
    }
}

fn background<S: Surface + ?Sized>(surface: &mut S, layout: &Layout) {
    let canvas = layout.canvas_rect();
    surface.clear(canvas);
    surface.draw_background(canvas);
}

fn centre(layout: &Layout) -> Vec2 {
    Vec2::new(layout.canvas_width / 2.0, layout.canvas_height / 2.0)
}

/// Board, snake, food and score
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, state: &GameState, layout: &Layout) {
    background(surface, layout);
    surface.stroke_rect(layout.play_area_rect(&state.play_area), colors::BORDER);

    for segment in &state.snake {
        surface.fill_rect(layout.cell_rect(*segment), colors::SNAKE);
    }
    surface.fill_rect(layout.cell_rect(state.food), colors::FOOD);

    surface.fill_text(
        &format!("Score: {}", state.score),
        Vec2::new(10.0, 20.0) * layout.scale,
        score_style(layout),
    );
}

/// Countdown overlay (same background as a frame, no board)
pub fn draw_countdown<S: Surface + ?Sized>(
    surface: &mut S,
    value: i32,
    layout: &Layout,
    show_instructions: bool,
) {
    background(surface, layout);
    let style = banner_style(layout);
    surface.fill_text(&format!("Game starts in {}", value), centre(layout), style);

    if show_instructions {
        let hint = TextStyle {
            size: style.size / 2.0,
            ..style
        };
        let pos = centre(layout) + Vec2::new(0.0, style.size * 1.25);
        surface.fill_text(INSTRUCTIONS, pos, hint);
    }
}

/// Final frame with a game-over banner
pub fn draw_game_over<S: Surface + ?Sized>(surface: &mut S, state: &GameState, layout: &Layout) {
    draw_frame(surface, state, layout);
    surface.fill_text("Game Over", centre(layout), banner_style(layout));
}

/// Dispatch on a scene
pub fn draw_scene<S: Surface + ?Sized>(
    surface: &mut S,
    scene: Scene,
    state: &GameState,
    layout: &Layout,
    show_instructions: bool,
) {
    match scene {
        Scene::Countdown(value) => draw_countdown(surface, value, layout, show_instructions),
        Scene::Play => draw_frame(surface, state, layout),
        Scene::GameOver => draw_game_over(surface, state, layout),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Op, Recorder};
    use super::*;
    use crate::sim::{Direction, Point};

    #[test]
    fn test_frame_draws_every_segment_and_food() {
        let mut state = GameState::with_snake(
            1,
            vec![
                Point::new(278, 209),
                Point::new(258, 209),
                Point::new(238, 209),
            ],
            Direction::Right,
        );
        state.score = 4;
        let layout = Layout::from_scale(0.5);
        let mut surface = Recorder::default();

        draw_frame(&mut surface, &state, &layout);

        assert_eq!(surface.ops[0], Op::Clear(layout.canvas_rect()));
        assert_eq!(surface.ops[1], Op::Background(layout.canvas_rect()));
        assert_eq!(
            surface.ops[2],
            Op::Stroke(
                layout.play_area_rect(&state.play_area),
                colors::BORDER.to_string()
            )
        );
        let snake = surface.fills(colors::SNAKE);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake[0], Rect::new(139.0, 104.5, 10.0, 10.0));
        assert_eq!(surface.fills(colors::FOOD), vec![layout.cell_rect(state.food)]);
        assert_eq!(surface.texts(), vec!["Score: 4"]);
    }

    #[test]
    fn test_frame_does_not_mutate_state() {
        let state = GameState::new(9);
        let before = (state.snake.clone(), state.food, state.score);
        let mut surface = Recorder::default();
        draw_frame(&mut surface, &state, &Layout::default());
        assert_eq!(before, (state.snake.clone(), state.food, state.score));
    }

    #[test]
    fn test_countdown_overlay() {
        let layout = Layout::default();
        let mut surface = Recorder::default();
        draw_countdown(&mut surface, 2, &layout, true);
        assert_eq!(surface.texts(), vec!["Game starts in 2", INSTRUCTIONS]);
        assert!(surface.fills(colors::SNAKE).is_empty());
        match &surface.ops[2] {
            Op::Text(_, pos, style) => {
                assert_eq!(*pos, Vec2::new(460.0, 360.0));
                assert_eq!(style.align, TextAlign::Center);
            }
            other => panic!("unexpected op {:?}", other),
        }

        let mut plain = Recorder::default();
        draw_countdown(&mut plain, 0, &layout, false);
        assert_eq!(plain.texts(), vec!["Game starts in 0"]);
    }

    #[test]
    fn test_game_over_scene() {
        let state = GameState::new(3);
        let mut surface = Recorder::default();
        draw_scene(&mut surface, Scene::GameOver, &state, &Layout::default(), true);
        assert_eq!(surface.texts(), vec!["Score: 0", "Game Over"]);
    }
}
