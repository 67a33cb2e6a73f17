//! Data module for ga4-contract
//!
//! Contains the fixed analytics policy tables: required paths, identifier
//! formats, consent modes, the event taxonomy and tag loader markers.

pub mod policy;
