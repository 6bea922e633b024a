//! Domain entities - Objects with identity and lifecycle

mod trip;
mod trip_expense;

pub use trip::Trip;
pub use trip_expense::{DEFAULT_EXPENSE_CATEGORY, TripExpense};
