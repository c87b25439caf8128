pub mod macros;
pub mod time_grid;

pub use time_grid::{GridRow, DAY_RANGE, LUNCH_BREAK_RANGE, SLOT_RANGE};
