//! # Routing
//!
//! A* and Dijkstra searches over the walkable cells of a [`GridMap`].
//!
//! A route lists every cell from the origin to the target, both included.
//! An unreachable target yields an empty route.

use super::{AnyGrid, Array2D, CellNeighborQuery, GridMap};
use crate::config::{DEFAULT_BLOCKED_COST, DEFAULT_CARDINAL_COST, DEFAULT_DIAGONAL_COST};
use crate::Vec2I;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Search algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Route {
    /// Best-first search guided by a distance estimate
    #[default]
    AStar,
    /// Uniform-cost search
    Dijkstra,
}

/// Step costs for [`GridMap::compute_route`].
///
/// Vertex-sharing neighbors are only considered when `diagonal` is positive.
/// `blocked` is added to the cost of entering a cell flagged `BLOCKED`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteCost {
    pub cardinal: f32,
    pub diagonal: f32,
    pub blocked: f32,
}

impl RouteCost {
    pub fn new(cardinal: f32, diagonal: f32, blocked: f32) -> Self {
        Self {
            cardinal,
            diagonal,
            blocked,
        }
    }
}

impl Default for RouteCost {
    fn default() -> Self {
        Self::new(DEFAULT_CARDINAL_COST, DEFAULT_DIAGONAL_COST, DEFAULT_BLOCKED_COST)
    }
}

/// Open-set entry.
#[derive(Debug, Clone, Copy)]
struct RouteNode {
    position: Vec2I,
    f_score: f32,
    g_score: f32,
}

impl PartialEq for RouteNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RouteNode {}

impl PartialOrd for RouteNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RouteNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior in BinaryHeap; on equal
        // f-scores the node furthest from the origin wins, then the lowest
        // position
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| self.g_score.total_cmp(&other.g_score))
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl GridMap {
    /// Cheapest route from `origin` to `target` with the given step costs.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridstead::{GridMap, Route, RouteCost, Vec2F, Vec2I};
    ///
    /// let mut map = GridMap::orthogonal(Vec2F::new(16.0, 16.0), Vec2I::new(5, 5));
    /// map.set_wall(Vec2I::new(2, 1));
    ///
    /// let cost = RouteCost::new(1.0, 0.0, 0.0);
    /// let route = map.compute_route(Vec2I::new(2, 0), Vec2I::new(2, 2), cost, Route::AStar);
    /// assert_eq!(route.first(), Some(&Vec2I::new(2, 0)));
    /// assert_eq!(route.last(), Some(&Vec2I::new(2, 2)));
    /// assert_eq!(route.len(), 5);
    /// ```
    pub fn compute_route(&self, origin: Vec2I, target: Vec2I, cost: RouteCost, route: Route) -> Vec<Vec2I> {
        let diagonal = cost.diagonal > 0.0;
        let mut query = CellNeighborQuery::VALID;
        if diagonal {
            query |= CellNeighborQuery::DIAGONAL;
        }

        let step_cost = |from: Vec2I, to: Vec2I| self.step_cost(from, to, cost);
        let heuristic = |position: Vec2I| match route {
            Route::AStar => estimate(self.grid(), position, target, cost.cardinal, diagonal.then_some(cost.diagonal)),
            Route::Dijkstra => 0.0,
        };

        self.search(origin, target, query, step_cost, heuristic)
    }

    /// Cheapest route using a caller-supplied step cost.
    ///
    /// Every neighbor, vertex-sharing ones included, is offered to `cost`. A
    /// negative or non-finite cost forbids the step. The A* estimate counts
    /// steps, so it stays admissible as long as each allowed step costs at
    /// least 1; use [`Route::Dijkstra`] otherwise.
    pub fn compute_route_with<F>(&self, origin: Vec2I, target: Vec2I, cost: F, route: Route) -> Vec<Vec2I>
    where
        F: FnMut(Vec2I, Vec2I) -> f32,
    {
        let heuristic = |position: Vec2I| match route {
            Route::AStar => estimate(self.grid(), position, target, 1.0, Some(1.0)),
            Route::Dijkstra => 0.0,
        };

        self.search(origin, target, CellNeighborQuery::all(), cost, heuristic)
    }

    /// Total cost of walking `route` with the given step costs.
    pub fn compute_route_cost(&self, route: &[Vec2I], cost: RouteCost) -> f32 {
        route
            .windows(2)
            .map(|step| self.step_cost(step[0], step[1], cost))
            .sum()
    }

    fn step_cost(&self, from: Vec2I, to: Vec2I, cost: RouteCost) -> f32 {
        let base = if self.grid().are_diagonal_neighbors(from, to) {
            cost.diagonal
        } else {
            cost.cardinal
        };

        if self.blocked(to) {
            base + cost.blocked
        } else {
            base
        }
    }

    fn search<C, H>(&self, origin: Vec2I, target: Vec2I, query: CellNeighborQuery, mut cost: C, heuristic: H) -> Vec<Vec2I>
    where
        C: FnMut(Vec2I, Vec2I) -> f32,
        H: Fn(Vec2I) -> f32,
    {
        if !self.valid(origin) || !self.walkable(target) {
            log::debug!("No route from {:?} to {:?}: endpoint unavailable", origin, target);
            return Vec::new();
        }

        if origin == target {
            return vec![origin];
        }

        let size = self.size();
        let mut g_score = Array2D::new(size, f32::INFINITY);
        let mut came_from: Array2D<Option<Vec2I>> = Array2D::new(size, None);
        let mut closed = Array2D::new(size, false);
        let mut open_set = BinaryHeap::new();

        if let Some(score) = g_score.get_mut(origin) {
            *score = 0.0;
        }
        open_set.push(RouteNode {
            position: origin,
            f_score: heuristic(origin),
            g_score: 0.0,
        });

        while let Some(current) = open_set.pop() {
            match closed.get_mut(current.position) {
                Some(done) if !*done => *done = true,
                _ => continue,
            }

            if current.position == target {
                let route = reconstruct(&came_from, origin, target);
                log::debug!(
                    "Route from {:?} to {:?}: {} cells, cost {}",
                    origin,
                    target,
                    route.len(),
                    current.g_score
                );
                return route;
            }

            for neighbor in self.grid().compute_neighbors(current.position, query) {
                if closed.get(neighbor).copied().unwrap_or(true) || !self.walkable(neighbor) {
                    continue;
                }

                let step = cost(current.position, neighbor);
                if !step.is_finite() || step < 0.0 {
                    continue;
                }

                let tentative = current.g_score + step;
                let Some(best) = g_score.get_mut(neighbor) else {
                    continue;
                };
                if tentative < *best {
                    *best = tentative;
                    if let Some(parent) = came_from.get_mut(neighbor) {
                        *parent = Some(current.position);
                    }
                    open_set.push(RouteNode {
                        position: neighbor,
                        f_score: tentative + heuristic(neighbor),
                        g_score: tentative,
                    });
                }
            }
        }

        log::debug!("No route from {:?} to {:?}", origin, target);
        Vec::new()
    }
}

fn reconstruct(came_from: &Array2D<Option<Vec2I>>, origin: Vec2I, target: Vec2I) -> Vec<Vec2I> {
    let mut route = vec![target];
    let mut current = target;

    while current != origin {
        match came_from.get(current).copied().flatten() {
            Some(previous) => {
                route.push(previous);
                current = previous;
            }
            None => break,
        }
    }

    route.reverse();
    route
}

/// Lower bound on the cost from `from` to `to`.
///
/// Orthogonal, isometric and staggered grids are measured on their square
/// lattice: octile distance when vertex moves are allowed, straight-line
/// distance otherwise. Hexagonal grids count hex steps.
fn estimate(grid: &AnyGrid, from: Vec2I, to: Vec2I, cardinal: f32, diagonal: Option<f32>) -> f32 {
    let cardinal = cardinal.max(0.0);

    let delta = match grid {
        AnyGrid::None => return 0.0,
        AnyGrid::Hexagonal(grid) => return cardinal * grid.hex_distance(from, to) as f32,
        AnyGrid::Orthogonal(_) | AnyGrid::Isometric(_) => (to - from).abs(),
        AnyGrid::Staggered(grid) => (grid.compute_lattice_position(to) - grid.compute_lattice_position(from)).abs(),
    };

    let long = delta.x.max(delta.y) as f32;
    let short = delta.x.min(delta.y) as f32;

    match diagonal {
        Some(diagonal) => {
            let diagonal = diagonal.max(0.0).min(2.0 * cardinal);
            if diagonal < cardinal {
                diagonal * long
            } else {
                cardinal * long + (diagonal - cardinal) * short
            }
        }
        None => cardinal * (long * long + short * short).sqrt(),
    }
}
