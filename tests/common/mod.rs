//! Shared test utilities

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_backend;
pub mod recording_surface;
