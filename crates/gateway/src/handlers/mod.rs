//! API handlers module

pub mod archive;
pub mod catalog;
pub mod health;
pub mod modules;
pub mod search;
pub mod session;
pub mod watchlist;
