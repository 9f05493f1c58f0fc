//! Shared type definitions for the Daycycle time-of-day engine.
//!
//! These types cross the boundary between the engine and its consumers
//! (lighting, skybox, clock display). They flow downstream to `TypeScript`
//! via `ts-rs` for web-based presentation layers.
//!
//! # Modules
//!
//! - [`enums`] -- The [`Phase`] cycle of the day
//! - [`events`] -- [`DayCycleEvent`] records for fired notifications
//! - [`snapshot`] -- [`DayCycleSnapshot`], the query API at one instant

pub mod enums;
pub mod events;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use enums::Phase;
pub use events::DayCycleEvent;
pub use snapshot::DayCycleSnapshot;

#[cfg(test)]
mod tests {
    //! Binding generation for the presentation layer.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::enums::Phase::export_all();
        let _ = crate::events::DayCycleEvent::export_all();
        let _ = crate::snapshot::DayCycleSnapshot::export_all();
    }
}
