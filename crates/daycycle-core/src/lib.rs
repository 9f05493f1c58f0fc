//! Accelerated day/night cycle engine.
//!
//! The engine advances a simulated clock faster than real time, classifies
//! the current moment into day/night and into one of four phases, fires
//! edge-triggered notifications on transitions, and computes the sun's
//! rotation for positioning a light source. It is single-threaded and
//! poll-driven: an external loop calls [`DayCycleService::tick`] once per
//! frame.
//!
//! # Modules
//!
//! - [`clock`] -- Absolute simulated timestamp advanced by scaled real time.
//! - [`config`] -- [`ClockSettings`] validation and loading from
//!   `daycycle-config.yaml` into strongly-typed structs.
//! - [`phase`] -- Time of day to [`Phase`] classification.
//! - [`service`] -- The [`DayCycleService`] facade and its notifications.
//! - [`sun`] -- Day/night test and sun rotation angle.
//! - [`watched`] -- [`WatchedValue`], the change-detecting primitive.
//!
//! [`ClockSettings`]: config::ClockSettings
//! [`DayCycleService`]: service::DayCycleService
//! [`DayCycleService::tick`]: service::DayCycleService::tick
//! [`Phase`]: daycycle_types::Phase
//! [`WatchedValue`]: watched::WatchedValue

pub mod clock;
pub mod config;
pub mod phase;
pub mod service;
pub mod sun;
pub mod watched;
