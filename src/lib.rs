// src/lib.rs

pub mod cache;
pub mod cli;
pub mod common;
pub mod config;
pub mod identity;
pub mod models;
pub mod services;
pub mod store;
