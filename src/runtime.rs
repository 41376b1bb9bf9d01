//! Runtime for processing inbound message events
//!
//! One event is processed to completion, spreadsheet I/O included, before
//! the next is dequeued. A failed save for one conversation is logged and
//! never blocks processing for the others.

mod executor;
pub mod traits;


pub use executor::IntakeRuntime;
pub use traits::*;
