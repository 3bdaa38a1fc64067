//! Game implementations.

pub mod cold_war;
