use std::fmt;
use std::mem;

use thiserror::Error;
use tracing::debug;
use tracing::trace;

use crate::grid::Grid;
use crate::grid::GridError;
use crate::grid::Pos;
use crate::grid::parse_grid;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;
use crate::rule_set::parse_rule;

/// What happens to a single cell on the next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Dead cell comes alive
    Birth,
    /// Live cell dies
    Death,
    /// Live cell stays alive
    Survive,
    /// Dead cell stays dead
    Inert,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),

    #[error("Invalid pattern: {0}")]
    Grid(#[from] GridError),
}

/// A Game of Life simulation on a toroidal grid.
#[derive(Debug, Clone)]
pub struct Engine {
    rule: RuleSet,

    /// The current generation
    grid: Grid,

    /// Next generation buffer. Same shape as `grid`, only meaningful during a step.
    scratch: Grid,

    /// Number of generations computed since construction
    generation: u64,
}

impl Default for Engine {
    /// `B3/S23` on a 3x3 grid with a single live centre cell.
    fn default() -> Self {
        Self::with_grid(RuleSet::default(), Grid::default())
    }
}

impl Engine {
    /// Create an engine from a rule string like `B3/S23` and text rows where a space is a dead cell
    /// and anything else is alive.
    pub fn new<S: AsRef<str>>(rule: &str, pattern: &[S]) -> Result<Self, EngineError> {
        let rule = parse_rule(rule)?;
        let grid = parse_grid(pattern)?;

        Ok(Self::with_grid(rule, grid))
    }

    pub fn with_grid(rule: RuleSet, grid: Grid) -> Self {
        debug!(rows = grid.rows(), cols = grid.cols(), %rule, "Creating engine");

        let scratch = grid.clone();

        Self {
            rule,
            grid,
            scratch,
            generation: 0,
        }
    }

    pub fn rule(&self) -> RuleSet {
        self.rule
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool, GridError> {
        self.grid.get(Pos::new(row, col))
    }

    pub fn neighbour_coordinates(&self, row: usize, col: usize) -> Result<[Pos; 8], GridError> {
        let pos = self.grid.check(Pos::new(row, col))?;

        Ok(self.grid.neighbours(pos))
    }

    pub fn live_neighbour_count(&self, row: usize, col: usize) -> Result<u8, GridError> {
        let pos = self.grid.check(Pos::new(row, col))?;

        Ok(self.grid.live_neighbours(pos))
    }

    pub fn classify_transition(&self, row: usize, col: usize) -> Result<Transition, GridError> {
        let pos = self.grid.check(Pos::new(row, col))?;

        Ok(classify(&self.rule, &self.grid, pos))
    }

    pub fn living_count(&self) -> usize {
        self.grid.living_count()
    }

    pub fn dead_count(&self) -> usize {
        self.grid.dead_count()
    }

    pub fn render(&self) -> Vec<String> {
        self.grid.render()
    }

    /// Rendered rows joined by newlines, with a trailing newline.
    pub fn to_display_text(&self) -> String {
        self.grid.to_string()
    }

    /// Advance the world by one generation.
    ///
    /// Every transition is computed from the current generation and applied all at once.
    pub fn advance_generation(&mut self) {
        self.scratch.copy_from(&self.grid);

        for pos in self.grid.positions() {
            match classify(&self.rule, &self.grid, pos) {
                Transition::Birth => self.scratch.put(pos, true),
                Transition::Death => self.scratch.put(pos, false),
                Transition::Survive | Transition::Inert => {}
            }
        }

        mem::swap(&mut self.grid, &mut self.scratch);
        self.generation += 1;

        trace!(
            generation = self.generation,
            living = self.grid.living_count(),
            "Advanced generation"
        );
    }

    /// Advance the world by `n` generations.
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            self.advance_generation();
        }
    }
}

fn classify(rule: &RuleSet, grid: &Grid, pos: Pos) -> Transition {
    let n = grid.live_neighbours(pos);

    match (grid.at(pos), rule) {
        (true, r) if r.can_survive(n) => Transition::Survive,
        (true, _) => Transition::Death,
        (false, r) if r.can_be_born(n) => Transition::Birth,
        (false, _) => Transition::Inert,
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}
