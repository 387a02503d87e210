//! Background tasks owned by the runtime.

mod turn;

pub use turn::TurnWorker;
