pub mod error;
pub mod lookup;

pub use error::Error;
pub use lookup::{Outcome, PROGRESS_INTERVAL, SearchMode, TermType, binsearch, holder_for, linear, open_database};
