pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, section, serving, success, summary_row, warn};
pub use table::{TableBuilder, stats_table};
pub use theme::{paint, Tone};
