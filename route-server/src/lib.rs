//! Accessible route finder server.
//!
//! A web application that answers: "which routes between these places
//! meet all of my accessibility needs, and how do they compare?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod finder;
pub mod search;
pub mod session;
pub mod telemetry;
pub mod web;
