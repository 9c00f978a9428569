//! SkillShare - student/tutor matchmaking core
//!
//! Accounts, per-role profile persistence against a remote document store,
//! the profile screens' view-state controller and the screen navigation
//! graph.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
