//! Pure scheduling computations: HST date arithmetic, template
//! construction and recalculation, and calendar day-bucket expansion.
//! Nothing in this module touches the database or the clock.

pub mod calendar;
pub mod hst;
pub mod template;
