use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::grid::OccupancyGrid;
use crate::types::Cell;

const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub fn find_path(start: Cell, goal: Cell, grid: &OccupancyGrid) -> Vec<Cell> {
    let (Some(start_idx), Some(_)) = (grid.index(start), grid.index(goal)) else {
        return Vec::new();
    };

    let cell_count = (grid.columns() * grid.rows()) as usize;
    let mut g_score = vec![i32::MAX; cell_count];
    let mut came_from: Vec<Option<Cell>> = vec![None; cell_count];
    let mut open = BinaryHeap::new();

    g_score[start_idx] = 0;
    open.push(Reverse((start.manhattan(goal), 0, start)));

    while let Some(Reverse((_, current_g, current))) = open.pop() {
        if current == goal {
            return reconstruct(grid, &came_from, current);
        }
        let Some(current_idx) = grid.index(current) else {
            continue;
        };
        if current_g > g_score[current_idx] {
            continue;
        }

        for (dcol, drow) in NEIGHBOR_OFFSETS {
            let neighbor = current.offset(dcol, drow);
            let Some(neighbor_idx) = grid.index(neighbor) else {
                continue;
            };
            if grid.is_solid(neighbor) {
                continue;
            }
            let tentative_g = current_g + 1;
            if tentative_g < g_score[neighbor_idx] {
                g_score[neighbor_idx] = tentative_g;
                came_from[neighbor_idx] = Some(current);
                open.push(Reverse((
                    tentative_g + neighbor.manhattan(goal),
                    tentative_g,
                    neighbor,
                )));
            }
        }
    }

    Vec::new()
}

fn reconstruct(grid: &OccupancyGrid, came_from: &[Option<Cell>], goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = grid.index(current).and_then(|idx| came_from[idx]) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::find_path;
    use crate::grid::OccupancyGrid;
    use crate::rng::Rng;
    use crate::types::Cell;

    fn bfs_distance(start: Cell, goal: Cell, grid: &OccupancyGrid) -> Option<usize> {
        let mut dist = vec![usize::MAX; (grid.columns() * grid.rows()) as usize];
        let mut queue = VecDeque::new();
        dist[grid.index(start)?] = 0;
        queue.push_back(start);
        while let Some(cell) = queue.pop_front() {
            let here = dist[grid.index(cell)?];
            if cell == goal {
                return Some(here);
            }
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let next = cell.offset(dx, dy);
                let Some(idx) = grid.index(next) else {
                    continue;
                };
                if grid.is_solid(next) || dist[idx] != usize::MAX {
                    continue;
                }
                dist[idx] = here + 1;
                queue.push_back(next);
            }
        }
        None
    }

    fn random_grid(rng: &mut Rng, columns: usize, rows: usize) -> OccupancyGrid {
        let rows: Vec<String> = (0..rows)
            .map(|_| {
                (0..columns)
                    .map(|_| if rng.bool(0.3) { '#' } else { '.' })
                    .collect()
            })
            .collect();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        OccupancyGrid::from_rows(&refs)
    }

    fn assert_connected(path: &[Cell], grid: &OccupancyGrid) {
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1, "path jumps: {path:?}");
        }
        for cell in path.iter().skip(1) {
            assert!(grid.is_floor(*cell), "path crosses wall at {cell:?}");
        }
    }

    #[test]
    fn path_length_matches_bfs_on_random_grids() {
        let mut rng = Rng::new(2024);
        for _ in 0..300 {
            let grid = random_grid(&mut rng, 7, 6);
            let start = Cell::new(rng.int(0, 6), rng.int(0, 5));
            let goal = Cell::new(rng.int(0, 6), rng.int(0, 5));
            let path = find_path(start, goal, &grid);

            match bfs_distance(start, goal, &grid) {
                Some(distance) if grid.is_floor(goal) || start == goal => {
                    assert_eq!(path.len(), distance + 1);
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&goal));
                    assert_connected(&path, &grid);
                }
                _ => assert!(path.is_empty()),
            }
        }
    }

    #[test]
    fn walled_in_goal_yields_empty_path() {
        let grid = OccupancyGrid::from_rows(&[".....", "..#..", ".#.#.", "..#..", "....."]);
        assert!(find_path(Cell::new(0, 0), Cell::new(2, 2), &grid).is_empty());
    }

    #[test]
    fn start_equal_to_goal_is_single_cell_path() {
        let grid = OccupancyGrid::from_rows(&["...", "...", "..."]);
        assert_eq!(
            find_path(Cell::new(1, 1), Cell::new(1, 1), &grid),
            vec![Cell::new(1, 1)]
        );
    }

    #[test]
    fn out_of_bounds_endpoints_yield_empty_path() {
        let grid = OccupancyGrid::from_rows(&["...", "...", "..."]);
        assert!(find_path(Cell::new(-1, 0), Cell::new(2, 2), &grid).is_empty());
        assert!(find_path(Cell::new(0, 0), Cell::new(3, 0), &grid).is_empty());
    }

    #[test]
    fn detours_around_wall() {
        let grid = OccupancyGrid::from_rows(&[".....", ".###.", "....."]);
        let path = find_path(Cell::new(0, 1), Cell::new(4, 1), &grid);
        assert_eq!(path.len(), 7);
        assert_connected(&path, &grid);
    }
}
