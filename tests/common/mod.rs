#![allow(dead_code)]

#[path = "../../src/test_utils.rs"]
mod fixtures;

pub use fixtures::*;
