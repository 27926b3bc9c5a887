//! Outbound collaborators.

pub mod narrative;
