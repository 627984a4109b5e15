pub mod index;
pub mod row;

pub use index::{DseError, DseIndex};
pub use row::{DseRecord, DseRow};
