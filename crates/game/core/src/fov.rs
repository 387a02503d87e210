//! Line-of-sight from the player's position.
//!
//! Visibility is recomputed from scratch whenever the player moves or a door
//! opens: every `visible` flag is cleared, then a Bresenham ray is cast to
//! each tile inside the sight circle. Rays reveal every tile they cross and
//! stop right after the first opaque one, so walls and closed doors are seen
//! but never seen through. `seen` is only ever set, never cleared.
use crate::state::{Character, Level, Position};

/// Clears `visible` on every tile and re-lights the tiles `viewer` can see.
pub fn recompute_visibility(level: &mut Level, viewer: &Character) {
    for tile in level.tiles_mut() {
        tile.visible = false;
    }

    let origin = viewer.position;
    let range = viewer.sight_range.max(0);
    let (x_min, x_max) = axis_bounds(origin.x, range, level.width());
    let (y_min, y_max) = axis_bounds(origin.y, range, level.height());
    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let target = Position::new(x, y);
            if within_sight(origin, target, range) {
                cast_ray(level, origin, target);
            }
        }
    }
}

/// Candidate span `origin ± range` clipped to `0..len`. Empty when `len` is 0.
fn axis_bounds(origin: i32, range: i32, len: usize) -> (i32, i32) {
    let last = i32::try_from(len).unwrap_or(i32::MAX) - 1;
    (
        origin.saturating_sub(range).max(0),
        origin.saturating_add(range).min(last),
    )
}

/// Sight-circle membership: Euclidean distance rounded to the nearest tile
/// must not exceed `range`.
///
/// Integer form of `round(sqrt(dx² + dy²)) <= range`. With range 1 the
/// diagonal neighbours (distance ≈ 1.41) are inside and the tiles two steps
/// away are not.
pub fn within_sight(origin: Position, target: Position, range: i32) -> bool {
    let dx = i128::from(target.x) - i128::from(origin.x);
    let dy = i128::from(target.y) - i128::from(origin.y);
    let diameter = 2 * i128::from(range) + 1;
    4 * (dx * dx + dy * dy) < diameter * diameter
}

fn cast_ray(level: &mut Level, origin: Position, target: Position) {
    for position in Line::new(origin, target) {
        match level.tile_mut(position) {
            Some(tile) => tile.reveal(),
            None => return,
        }
        if !level.can_see_through(position) {
            return;
        }
    }
}

/// Integer Bresenham line from `start` to `end`, both inclusive.
///
/// Lines steeper than 45° are walked with the axes swapped. Iteration always
/// starts at `start`, stepping x by ±1, so a ray cast leftwards crosses the
/// mirror image of the tiles a rightward ray crosses.
#[derive(Clone, Debug)]
pub struct Line {
    steep: bool,
    x: i32,
    y: i32,
    end_x: i32,
    x_step: i32,
    y_step: i32,
    delta_x: i32,
    delta_y: i32,
    error: i32,
    done: bool,
}

impl Line {
    pub fn new(start: Position, end: Position) -> Self {
        let steep = (end.y - start.y).abs() > (end.x - start.x).abs();
        let (start, end) = if steep {
            (Position::new(start.y, start.x), Position::new(end.y, end.x))
        } else {
            (start, end)
        };

        Self {
            steep,
            x: start.x,
            y: start.y,
            end_x: end.x,
            x_step: if start.x > end.x { -1 } else { 1 },
            y_step: if start.y >= end.y { -1 } else { 1 },
            delta_x: (end.x - start.x).abs(),
            delta_y: (end.y - start.y).abs(),
            error: 0,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.done {
            return None;
        }

        let current = if self.steep {
            Position::new(self.y, self.x)
        } else {
            Position::new(self.x, self.y)
        };

        if self.x == self.end_x {
            self.done = true;
        } else {
            self.x += self.x_step;
            self.error += self.delta_y;
            if 2 * self.error >= self.delta_x {
                self.y += self.y_step;
                self.error -= self.delta_x;
            }
        }

        Some(current)
    }
}
