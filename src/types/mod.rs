pub mod aggregate;
pub mod band;
pub mod commodity;
pub mod extremum;
pub mod series;

pub use aggregate::*;
pub use band::*;
pub use commodity::*;
pub use extremum::*;
pub use series::*;
