// src/handlers/mod.rs

pub mod download;
pub mod health;
pub mod levels;
pub mod locate;
