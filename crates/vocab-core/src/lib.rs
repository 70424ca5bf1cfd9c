//! # vocab-core
//!
//! Core types for the vocab backend.
//!
//! This crate provides the foundational types shared across all vocab crates:
//! - Entity structs for words, word definitions, and quiz questions
//! - The familiarity enum tracking learning progress
//! - ID prefix constants and formatting helpers

pub mod entities;
pub mod enums;
pub mod ids;
