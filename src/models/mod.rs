// src/models/mod.rs

pub mod admin;
pub mod coordinates;
