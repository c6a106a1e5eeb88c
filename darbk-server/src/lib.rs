//! Riyadh Metro routing server.
//!
//! Loads the metro station feed and line geometry, builds the station graph,
//! and answers: "how do I get from this station to that one, and how far
//! along am I?"

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod graph;
pub mod network;
pub mod route;
pub mod session;
pub mod web;
