pub mod engine;
pub mod grid;
pub mod rule_set;

pub use engine::Engine;
pub use engine::EngineError;
pub use engine::Transition;
pub use grid::Grid;
pub use grid::GridError;
pub use grid::Pos;
pub use rule_set::RuleError;
pub use rule_set::RuleSet;
