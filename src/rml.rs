//! Main module for rml library functionality

pub mod config;
pub mod formats;
pub mod processor;
pub mod reverse;
pub mod shortcuts;
pub mod styling;
pub mod tags;
pub mod transpile;
