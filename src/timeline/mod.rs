pub mod exec;
pub mod output;
pub mod series;

pub use exec::exec;
pub use output::{output_chart, output_json, output_ndjson, output_sparkline};
pub use series::{build_series, daily_records};
