mod save_record;
mod total_stats;

pub use save_record::{GameSettings, SaveRecord};
pub use total_stats::TotalStats;
