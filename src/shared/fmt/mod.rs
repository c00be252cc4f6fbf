//! Display formatting for prices, percentages and compact quantities.

pub mod decimal;
pub mod num;

pub use decimal::compact;
pub use num::{currency, percent};
