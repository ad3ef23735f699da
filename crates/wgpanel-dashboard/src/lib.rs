//! Dashboard controller for a wgpanel WireGuard backend.
//!
//! Mediates between the REST API (consumed, not defined here) and a host
//! view implementing [`view::DashboardView`].

pub mod api;
pub mod config;
pub mod controller;
pub mod term;
pub mod view;
