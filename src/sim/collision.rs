//! Collision detection on the grid
//!
//! Only the head can collide: with the play area border or with its own body.

use super::state::{PlayArea, Point};

/// What the head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head left the play area
    Wall,
    /// Head landed on another segment
    Body,
}

/// Head outside `[x1, x2) x [y1, y2)`
pub fn out_of_bounds(area: &PlayArea, head: Point) -> bool {
    head.x < area.x1 || head.y < area.y1 || head.x >= area.x2 || head.y >= area.y2
}

/// Head equal to any segment after it (checked on the post-move body)
pub fn bites_itself(snake: &[Point]) -> bool {
    match snake.split_first() {
        Some((head, body)) => body.contains(head),
        None => false,
    }
}

/// Check the moved snake. Wall hits take precedence.
pub fn detect(area: &PlayArea, snake: &[Point]) -> Option<Collision> {
    let head = *snake.first()?;
    if out_of_bounds(area, head) {
        Some(Collision::Wall)
    } else if bites_itself(snake) {
        Some(Collision::Body)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_half_open() {
        let area = PlayArea::DESIGN;
        assert!(!out_of_bounds(&area, Point::new(area.x1, area.y1)));
        assert!(out_of_bounds(&area, Point::new(area.x1 - 1, area.y1)));
        assert!(out_of_bounds(&area, Point::new(area.x1, area.y1 - 20)));
        assert!(out_of_bounds(&area, Point::new(area.x2, area.y1)));
        assert!(out_of_bounds(&area, Point::new(area.x1, area.y2)));
        assert!(!out_of_bounds(&area, Point::new(area.x2 - 1, area.y2 - 1)));
    }

    #[test]
    fn test_bites_itself() {
        let snake = [
            Point::new(100, 100),
            Point::new(120, 100),
            Point::new(120, 120),
            Point::new(100, 100),
        ];
        assert!(bites_itself(&snake));
        assert!(!bites_itself(&snake[..3]));
        assert!(!bites_itself(&[]));
        assert!(!bites_itself(&[Point::new(1, 1)]));
    }

    #[test]
    fn test_detect_prefers_wall() {
        let area = PlayArea::DESIGN;
        let outside = Point::new(area.x2, area.y1);
        assert_eq!(detect(&area, &[outside, outside]), Some(Collision::Wall));
        let inside = Point::new(area.x1, area.y1);
        assert_eq!(detect(&area, &[inside, inside]), Some(Collision::Body));
        assert_eq!(detect(&area, &[inside]), None);
        assert_eq!(detect(&area, &[]), None);
    }
}
