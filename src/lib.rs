//! MuseFlow metering core.
//!
//! Subscription-gated usage metering and capacity-limited plan upgrades
//! for the MuseFlow AI studio (chat, image, and video generation).
//! This crate owns the three invariant-bearing decision rules of the
//! product: plan-feature authorization, monthly quota enforcement, and
//! waitlist admission, together with the persistence interfaces they
//! read through. HTTP routing, auth, and billing webhooks live in the
//! surrounding services and consume this crate as a library.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
