#![allow(dead_code)]

pub mod auth;
pub mod factory;
pub mod test_state;
