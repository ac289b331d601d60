//! Cane Ops - Sugarcane crop cycle lifecycle and operations overview
//!
//! Manages the crop cycles of each bloc (one active cycle at a time), checks
//! readiness for closure, and rolls work plans up into cost and progress
//! overviews served over a JSON API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
