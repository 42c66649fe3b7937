//! Listing logic: filtering and sorting of [`crate::File`] lists for display.

pub mod filter;
