//! Grid searches over walkable tiles.
//!
//! Both searches expand the four orthogonal neighbours in the fixed order
//! right, left, up, down and only through tiles [`Level::can_walk`] accepts.
//! Neither result depends on hash iteration order.
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use arrayvec::ArrayVec;

use crate::state::{CardinalDirection, Level, Position, TerrainKind};

/// Walkable orthogonal neighbours of `position` in canonical order.
pub fn neighbors(level: &Level, position: Position) -> ArrayVec<Position, 4> {
    CardinalDirection::SEARCH_ORDER
        .iter()
        .map(|direction| direction.step(position))
        .filter(|next| level.can_walk(*next))
        .collect()
}

/// Terrain of the nearest floor tile reachable from `start`.
///
/// Used while building a level to decide what lies under doors, stairs and
/// start glyphs. Falls back to [`TerrainKind::DirtFloor`] when no floor is
/// reachable.
pub fn bfs_floor(level: &Level, start: Position) -> TerrainKind {
    let mut frontier = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);

    while let Some(current) = frontier.pop_front() {
        if level
            .tile(current)
            .is_some_and(|tile| tile.terrain == TerrainKind::DirtFloor)
        {
            return TerrainKind::DirtFloor;
        }
        for next in neighbors(level, current) {
            if visited.insert(next) {
                frontier.push_back(next);
            }
        }
    }

    TerrainKind::DirtFloor
}

/// Shortest walkable path from `start` to `goal`, both inclusive.
///
/// Returns an empty vector when `goal` cannot be reached; callers treat that
/// as "stay put". `start == goal` yields `[start]`.
pub fn astar(level: &Level, start: Position, goal: Position) -> Vec<Position> {
    let mut frontier = Frontier::default();
    frontier.push(start, 0);

    let mut came_from = HashMap::from([(start, start)]);
    let mut cost_so_far = HashMap::from([(start, 0)]);

    while let Some(current) = frontier.pop() {
        if current == goal {
            return reconstruct(&came_from, start, goal);
        }

        let new_cost = cost_so_far[&current] + 1;
        for next in neighbors(level, current) {
            if cost_so_far
                .get(&next)
                .is_none_or(|&known| new_cost < known)
            {
                cost_so_far.insert(next, new_cost);
                frontier.push(next, new_cost + next.manhattan(goal));
                came_from.insert(next, current);
            }
        }
    }

    Vec::new()
}

fn reconstruct(
    came_from: &HashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = came_from[&current];
        path.push(current);
    }
    path.reverse();
    path
}

/// Min-priority queue that pops equal priorities in insertion order.
#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<Reverse<(i32, u64, Position)>>,
    next_seq: u64,
}

impl Frontier {
    fn push(&mut self, position: Position, priority: i32) {
        self.heap.push(Reverse((priority, self.next_seq, position)));
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<Position> {
        self.heap.pop().map(|Reverse((_, _, position))| position)
    }
}
