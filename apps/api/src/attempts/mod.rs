// Quiz attempt persistence. Optional: generation never depends on it.

pub mod handlers;
pub mod store;
