//! Pure aggregation helpers.
//!
//! Nothing here touches the network; the pipeline in [`crate::wrapped`]
//! feeds fetched records through these functions.

pub mod history;
pub mod time;
pub mod year;

pub use history::{five_star_picks, last_watched, top_release_from_history, TopRelease};
pub use time::{
    calculate_average_per_day, calculate_days, calculate_hours, days_since_registration,
    format_date, TimeStats,
};
pub use year::{any_in_year, count_in_year, filter_by_year, Timestamped, YearWindow};
