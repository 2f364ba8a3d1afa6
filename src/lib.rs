pub mod markup;
pub mod numeric;
pub mod fields;
pub mod rates;
pub mod dates;
pub mod derive;
pub mod history;
pub mod import;
pub mod report;

pub use derive::{derive, DeriveOpts, DerivedStats};
pub use fields::{match_stats, Field, FieldValue, ParsedStats};
pub use history::{synthesize, HistoricalPoint, HistoryOpts};
pub use import::{parse_history_csv, ImportError, ImportedPoint};
pub use numeric::normalize;
pub use report::{analyze, analyze_with_history, AnalyzeOpts, ChannelReport, HistorySource};
