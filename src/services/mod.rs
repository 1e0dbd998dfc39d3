pub mod aggregator;
pub mod analysis;
pub mod scanner;

pub use aggregator::{assemble, band, WindowAggregator};
pub use analysis::AnalysisService;
pub use scanner::{scan, ExtremumScanner};
