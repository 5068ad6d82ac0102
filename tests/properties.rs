use proptest::prelude::*;

use torus_life::Engine;
use torus_life::Grid;
use torus_life::Pos;
use torus_life::RuleSet;
use torus_life::rule_set::B3S23;
use torus_life::rule_set::format_rule;
use torus_life::rule_set::parse_rule;

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1..8usize, 1..8usize).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(any::<bool>(), rows * cols).prop_map(move |cells| {
            let mut grid = Grid::dead(rows, cols).unwrap();

            for (i, alive) in cells.into_iter().enumerate() {
                grid.set(Pos::new(i / cols, i % cols), alive).unwrap();
            }

            grid
        })
    })
}

fn rule_strategy() -> impl Strategy<Value = RuleSet> {
    (1..0x200u16, 0..0x200u16).prop_map(|(b, s)| RuleSet::new(b, s))
}

/// Neighbour count using modular offsets
fn naive_count(grid: &Grid, pos: Pos) -> u8 {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut n = 0;

    for (i, dr) in [rows - 1, 0, 1].into_iter().enumerate() {
        for (j, dc) in [cols - 1, 0, 1].into_iter().enumerate() {
            if (i, j) == (1, 1) {
                continue;
            }

            let p = Pos::new((pos.row + dr) % rows, (pos.col + dc) % cols);
            if grid.get(p).unwrap() {
                n += 1;
            }
        }
    }

    n
}

/// Next generation computed into a fresh grid from a read-only snapshot
fn naive_next(rule: RuleSet, grid: &Grid) -> Grid {
    let mut next = Grid::dead(grid.rows(), grid.cols()).unwrap();

    for pos in grid.positions() {
        let n = naive_count(grid, pos);
        let alive = if grid.get(pos).unwrap() {
            rule.can_survive(n)
        } else {
            rule.can_be_born(n)
        };

        next.set(pos, alive).unwrap();
    }

    next
}

proptest! {
    #[test]
    fn living_plus_dead_is_area(grid in grid_strategy(), rule in rule_strategy(), steps in 0..6usize) {
        let area = grid.rows() * grid.cols();
        let mut engine = Engine::with_grid(rule, grid);

        for _ in 0..steps {
            prop_assert_eq!(engine.living_count() + engine.dead_count(), area);
            engine.advance_generation();
        }

        prop_assert_eq!(engine.living_count() + engine.dead_count(), area);
    }

    #[test]
    fn neighbours_stay_in_bounds(grid in grid_strategy()) {
        for pos in grid.positions() {
            for n in grid.neighbours(pos) {
                prop_assert!(grid.contains(n), "{:?} escaped a {}x{} grid", n, grid.rows(), grid.cols());
            }
        }
    }

    #[test]
    fn neighbour_count_matches_modular_offsets(grid in grid_strategy()) {
        for pos in grid.positions() {
            let n = grid.live_neighbours(pos);

            prop_assert!(n <= 8);
            prop_assert_eq!(n, naive_count(&grid, pos));
        }
    }

    #[test]
    fn advance_is_synchronous(grid in grid_strategy(), rule in rule_strategy()) {
        let want = naive_next(rule, &grid);
        let mut engine = Engine::with_grid(rule, grid);

        engine.advance_generation();

        prop_assert_eq!(engine.grid(), &want);
    }

    #[test]
    fn render_parses_back(grid in grid_strategy()) {
        let engine = Engine::with_grid(B3S23, grid.clone());

        let reparsed = Engine::new("B3/S23", engine.render().as_slice()).unwrap();

        prop_assert_eq!(reparsed.grid(), &grid);
        prop_assert_eq!(engine.to_display_text().parse::<Grid>().unwrap(), grid);
    }

    #[test]
    fn rule_format_parses_back(rule in rule_strategy()) {
        prop_assert_eq!(parse_rule(&format_rule(&rule)).unwrap(), rule);
    }
}
