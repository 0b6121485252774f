// Application layer - use cases and orchestration.
// The CLI talks to ExpenseService; ExpenseService talks to the store.

mod clock;
pub mod error;
pub mod reporting;
mod service;

pub use clock::*;
pub use error::*;
pub use reporting::*;
pub use service::*;
