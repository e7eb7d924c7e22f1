pub mod purchase;
pub mod selection;

pub use purchase::{PaymentReference, Purchase};
pub use selection::{check_selection, distinct_ids, total_minor_units, PricedCourse, SelectionError};

#[cfg(test)]
pub(crate) use selection::priced;
