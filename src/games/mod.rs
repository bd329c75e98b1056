//! Game implementations.

pub mod hyperxo;
