//! State structures for the pool engine

pub mod pool;

pub use pool::*;
