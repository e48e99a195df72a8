//! Trait definitions for pluggable components
//!
//! These traits define the seams of Subtrack, allowing
//! different backend implementations to be swapped in.

pub mod storage;
