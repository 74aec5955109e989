//! Cycle Time Tracker - Card cycle times for kanban boards
//!
//! This crate watches a board's columns, records when each card entered and
//! left the tracked part of the workflow, and produces a marking per card
//! that compares its cycle time against a per-board target.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
