//! Day cycle facade: the per-frame entry point for drivers and consumers.
//!
//! [`DayCycleService`] owns the [`Clock`] and three derived
//! [`WatchedValue`]s (`is_day_time`, `current_hour`, `current_phase`). Each
//! call to [`DayCycleService::tick`]:
//!
//! 1. advances the clock by the scaled real-time delta,
//! 2. recomputes day/night, hour and phase from the new timestamp,
//! 3. feeds each into its watched value in that order, which fires
//!    sunrise/sunset, hour-change and phase-change notifications only when
//!    the derived value actually changed.
//!
//! The phase cycle Morning -> Afternoon -> Evening -> Night -> Morning is
//! driven purely by simulated time. It never moves backward because the
//! clock is monotonic, and it has no terminal state.
//!
//! Callbacks run synchronously inside `tick`. The service is borrowed
//! mutably for the whole call, so a callback cannot re-enter it.

use chrono::NaiveDateTime;
use daycycle_types::{DayCycleEvent, DayCycleSnapshot, Phase};
use tracing::{debug, info, trace};

use crate::clock::{Clock, ClockError};
use crate::config::ClockSettings;
use crate::phase;
use crate::sun;
use crate::watched::{SubscriptionId, WatchedValue};

/// The watched value a [`Subscription`] is registered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Channel {
    DayTime,
    Hour,
    Phase,
}

/// Handle for a notification callback registered on the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    channel: Channel,
    id: SubscriptionId,
}

/// Summary of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// The tick number that was executed (1 for the first tick).
    pub tick: u64,
    /// Timestamp after advancing.
    pub current_time: NaiveDateTime,
    /// Integer hour after advancing.
    pub current_hour: u32,
    /// Day/night state after advancing.
    pub is_day_time: bool,
    /// Phase after advancing.
    pub current_phase: Phase,
    /// Notifications fired during this tick, in firing order.
    pub events: Vec<DayCycleEvent>,
}

/// Accelerated day/night cycle with change notifications.
#[derive(Debug)]
pub struct DayCycleService {
    clock: Clock,
    ticks: u64,
    is_day_time: WatchedValue<bool>,
    current_hour: WatchedValue<u32>,
    current_phase: WatchedValue<Phase>,
}

impl DayCycleService {
    /// Create a service whose clock starts today at `morning_hour`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the settings are invalid.
    pub fn new(settings: ClockSettings) -> Result<Self, ClockError> {
        Ok(Self::from_clock(Clock::new(settings)?))
    }

    /// Create a service whose clock starts at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the settings are invalid.
    pub fn starting_at(settings: ClockSettings, start: NaiveDateTime) -> Result<Self, ClockError> {
        Ok(Self::from_clock(Clock::starting_at(settings, start)?))
    }

    /// Build the derived values from the clock's starting timestamp.
    fn from_clock(clock: Clock) -> Self {
        let time = clock.now().time();
        let boundaries = clock.boundaries();
        let is_day_time = sun::is_day_time(time, boundaries);
        let phase = phase::classify(time, boundaries);
        let hour = clock.hour();

        debug!(
            start = %clock.now(),
            hour,
            is_day_time,
            phase = %phase,
            time_multiplier = clock.settings().time_multiplier,
            "Day cycle initialized"
        );

        Self {
            clock,
            ticks: 0,
            is_day_time: WatchedValue::new(is_day_time),
            current_hour: WatchedValue::new(hour),
            current_phase: WatchedValue::new(phase),
        }
    }

    /// Advance by `delta_real_seconds` of real time and fire notifications
    /// for every derived value that changed.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidArgument`] for a negative or non-finite
    /// delta and [`ClockError::TimestampOverflow`] if the clock cannot
    /// advance. On error nothing changes and nothing fires.
    pub fn tick(&mut self, delta_real_seconds: f64) -> Result<TickReport, ClockError> {
        let now = self.clock.advance(delta_real_seconds)?;
        self.ticks = self.ticks.saturating_add(1);

        let boundaries = self.clock.boundaries();
        let is_day_time = sun::is_day_time(now.time(), boundaries);
        let hour = self.clock.hour();
        let phase = phase::classify(now.time(), boundaries);

        let mut events = Vec::new();

        if self.is_day_time.set(is_day_time) {
            let event = DayCycleEvent::from_day_time(is_day_time);
            info!(time = %now, event = ?event, "Day/night changed");
            events.push(event);
        }

        if self.current_hour.set(hour) {
            debug!(time = %now, hour, "Hour changed");
            events.push(DayCycleEvent::HourChanged { hour });
        }

        if self.current_phase.set(phase) {
            info!(time = %now, phase = %phase, "Phase changed");
            events.push(DayCycleEvent::PhaseChanged { phase });
        }

        trace!(
            tick = self.ticks,
            delta_real_seconds,
            time = %now,
            events = events.len(),
            "Tick applied"
        );

        Ok(TickReport {
            tick: self.ticks,
            current_time: now,
            current_hour: hour,
            is_day_time,
            current_phase: phase,
            events,
        })
    }

    /// Sun rotation in degrees, `[0, 360)`, for the current time.
    pub fn sun_angle(&self) -> f64 {
        sun::sun_angle(self.clock.now().time(), self.clock.boundaries())
    }

    /// Current absolute timestamp.
    pub const fn current_time(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Current integer hour, `0..=23`.
    pub const fn current_hour(&self) -> u32 {
        *self.current_hour.get()
    }

    /// Whether the current time is strictly between sunrise and sunset.
    pub const fn is_day_time(&self) -> bool {
        *self.is_day_time.get()
    }

    /// Current phase of the day.
    pub const fn current_phase(&self) -> Phase {
        *self.current_phase.get()
    }

    /// Current time of day in fractional hours, `[0, 24)`.
    pub fn time_of_day(&self) -> f64 {
        self.clock.time_of_day()
    }

    /// Number of successful ticks applied so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Settings the service was built from.
    pub const fn settings(&self) -> &ClockSettings {
        self.clock.settings()
    }

    /// Capture the query API at this instant.
    pub fn snapshot(&self) -> DayCycleSnapshot {
        DayCycleSnapshot {
            ticks: self.ticks,
            current_time: self.current_time(),
            current_hour: self.current_hour(),
            is_day_time: self.is_day_time(),
            current_phase: self.current_phase(),
            sun_angle: self.sun_angle(),
        }
    }

    /// Call `callback` every time day time begins.
    pub fn on_sunrise<F>(&mut self, mut callback: F) -> Subscription
    where
        F: FnMut() + Send + 'static,
    {
        let id = self.is_day_time.subscribe(move |&is_day| {
            if is_day {
                callback();
            }
        });
        Subscription {
            channel: Channel::DayTime,
            id,
        }
    }

    /// Call `callback` every time day time ends.
    pub fn on_sunset<F>(&mut self, mut callback: F) -> Subscription
    where
        F: FnMut() + Send + 'static,
    {
        let id = self.is_day_time.subscribe(move |&is_day| {
            if !is_day {
                callback();
            }
        });
        Subscription {
            channel: Channel::DayTime,
            id,
        }
    }

    /// Call `callback` with the new hour every time the hour changes.
    pub fn on_hour_change<F>(&mut self, mut callback: F) -> Subscription
    where
        F: FnMut(u32) + Send + 'static,
    {
        let id = self.current_hour.subscribe(move |&hour| callback(hour));
        Subscription {
            channel: Channel::Hour,
            id,
        }
    }

    /// Call `callback` with the new phase every time the phase changes.
    pub fn on_phase_change<F>(&mut self, mut callback: F) -> Subscription
    where
        F: FnMut(Phase) + Send + 'static,
    {
        let id = self.current_phase.subscribe(move |&phase| callback(phase));
        Subscription {
            channel: Channel::Phase,
            id,
        }
    }

    /// Remove a callback. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        match subscription.channel {
            Channel::DayTime => self.is_day_time.unsubscribe(subscription.id),
            Channel::Hour => self.current_hour.unsubscribe(subscription.id),
            Channel::Phase => self.current_phase.unsubscribe(subscription.id),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::mpsc;

    use chrono::NaiveDate;

    use super::*;
    use crate::config::BoundaryRule;

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 20)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    fn service_at(hour: u32, min: u32) -> DayCycleService {
        DayCycleService::starting_at(ClockSettings::default(), at(hour, min, 0)).unwrap()
    }

    #[test]
    fn initial_state_is_derived_without_notifications() {
        let service = service_at(6, 0);
        assert_eq!(service.current_time(), at(6, 0, 0));
        assert_eq!(service.current_hour(), 6);
        assert!(service.is_day_time());
        assert_eq!(service.current_phase(), Phase::Morning);
        assert_eq!(service.ticks(), 0);
    }

    #[test]
    fn new_service_starts_in_morning() {
        let service = DayCycleService::new(ClockSettings::default()).unwrap();
        assert_eq!(service.current_phase(), Phase::Morning);
        assert_eq!(service.current_hour(), 6);
    }

    #[test]
    fn tick_lands_exactly_on_fractional_boundary() {
        let settings = ClockSettings {
            afternoon_hour: 10.0 + 1.0 / 3.0,
            ..ClockSettings::default()
        };
        let mut service = DayCycleService::starting_at(settings, at(10, 19, 59)).unwrap();
        assert_eq!(service.current_phase(), Phase::Morning);

        // 0.001 real seconds * 1000 = 1 simulated second, onto 10:20:00.
        let report = service.tick(0.001).unwrap();
        assert_eq!(report.current_time, at(10, 20, 0));
        assert_eq!(report.current_phase, Phase::Afternoon);
        assert!(report.events.contains(&DayCycleEvent::PhaseChanged {
            phase: Phase::Afternoon
        }));
    }

    #[test]
    fn exclusive_boundary_rule_starts_in_night() {
        let settings = ClockSettings {
            phase_boundaries: BoundaryRule::Exclusive,
            ..ClockSettings::default()
        };
        let service = DayCycleService::starting_at(settings, at(6, 0, 0)).unwrap();
        assert_eq!(service.current_phase(), Phase::Night);
    }

    #[test]
    fn invalid_settings_fail_construction() {
        let settings = ClockSettings {
            evening_hour: 9.0,
            ..ClockSettings::default()
        };
        assert!(matches!(
            DayCycleService::new(settings),
            Err(ClockError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn tick_reports_events_in_firing_order() {
        // 9:50 -> 10:10 crosses the hour and the afternoon boundary.
        let mut service = service_at(9, 50);
        let report = service.tick(1.2).unwrap();
        assert_eq!(report.tick, 1);
        assert_eq!(report.current_time, at(10, 10, 0));
        assert_eq!(
            report.events,
            vec![
                DayCycleEvent::HourChanged { hour: 10 },
                DayCycleEvent::PhaseChanged {
                    phase: Phase::Afternoon
                },
            ]
        );
    }

    #[test]
    fn sunset_fires_callbacks_and_event() {
        let (tx, rx) = mpsc::channel();
        let mut service = service_at(16, 50);
        let tx_rise = tx.clone();
        service.on_sunrise(move || tx_rise.send("sunrise").unwrap());
        service.on_sunset(move || tx.send("sunset").unwrap());

        let report = service.tick(0.6).unwrap();
        assert_eq!(report.current_time, at(17, 0, 0));
        assert!(!service.is_day_time());
        assert_eq!(report.events.first(), Some(&DayCycleEvent::Sunset));
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["sunset"]);
    }

    #[test]
    fn sunrise_fires_after_sunrise_hour() {
        let (tx, rx) = mpsc::channel();
        let mut service = service_at(4, 55);
        service.on_sunrise(move || tx.send(()).unwrap());

        // 4:55 -> 5:00: still night (sunrise is exclusive)
        service.tick(0.3).unwrap();
        assert!(!service.is_day_time());
        assert!(rx.try_recv().is_err());

        // 5:00 -> 5:05: day
        let report = service.tick(0.3).unwrap();
        assert!(service.is_day_time());
        assert!(report.events.contains(&DayCycleEvent::Sunrise));
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn hour_and_phase_callbacks_receive_new_values() {
        let (hour_tx, hour_rx) = mpsc::channel();
        let (phase_tx, phase_rx) = mpsc::channel();
        let mut service = service_at(13, 30);
        service.on_hour_change(move |h| hour_tx.send(h).unwrap());
        service.on_phase_change(move |p| phase_tx.send(p).unwrap());

        // 13:30 -> 14:30
        service.tick(3.6).unwrap();
        assert_eq!(hour_rx.try_iter().collect::<Vec<_>>(), vec![14]);
        assert_eq!(phase_rx.try_iter().collect::<Vec<_>>(), vec![Phase::Evening]);
    }

    #[test]
    fn large_delta_fires_each_notification_once() {
        let (tx, rx) = mpsc::channel();
        let mut service = service_at(6, 0);
        service.on_hour_change(move |h| tx.send(h).unwrap());

        // 6:00 -> 11:00 in a single tick: one notification with the final hour.
        let report = service.tick(18.0).unwrap();
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![11]);
        assert_eq!(report.events.len(), 2);
        assert_eq!(service.current_phase(), Phase::Afternoon);
    }

    #[test]
    fn unsubscribed_callback_is_not_called() {
        let (tx, rx) = mpsc::channel();
        let mut service = service_at(6, 50);
        let subscription = service.on_hour_change(move |h| tx.send(h).unwrap());

        assert!(service.unsubscribe(subscription));
        assert!(!service.unsubscribe(subscription));

        service.tick(0.6).unwrap();
        assert_eq!(service.current_hour(), 7);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn sunrise_and_sunset_subscriptions_are_independent() {
        let (tx, rx) = mpsc::channel();
        let mut service = service_at(16, 50);
        let tx_set = tx.clone();
        let sunrise = service.on_sunrise(move || tx.send("sunrise").unwrap());
        service.on_sunset(move || tx_set.send("sunset").unwrap());

        assert!(service.unsubscribe(sunrise));
        service.tick(0.6).unwrap();
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec!["sunset"]);
    }

    #[test]
    fn rejected_tick_changes_nothing() {
        let (tx, rx) = mpsc::channel();
        let mut service = service_at(9, 59);
        service.on_hour_change(move |h| tx.send(h).unwrap());

        let result = service.tick(-1.0);
        assert!(matches!(result, Err(ClockError::InvalidArgument { .. })));
        assert_eq!(service.current_time(), at(9, 59, 0));
        assert_eq!(service.ticks(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn snapshot_matches_queries() {
        let mut service = service_at(10, 0);
        service.tick(3.6).unwrap();
        let snapshot = service.snapshot();

        assert_eq!(snapshot.ticks, 1);
        assert_eq!(snapshot.current_time, at(11, 0, 0));
        assert_eq!(snapshot.current_hour, 11);
        assert!(snapshot.is_day_time);
        assert_eq!(snapshot.current_phase, Phase::Afternoon);
        assert!((snapshot.sun_angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn sun_angle_does_not_touch_state() {
        let service = service_at(23, 0);
        let first = service.sun_angle();
        let second = service.sun_angle();
        assert!((first - second).abs() < f64::EPSILON);
        assert!(first > 180.0 && first < 360.0);
        assert_eq!(service.current_time(), at(23, 0, 0));
    }
}
