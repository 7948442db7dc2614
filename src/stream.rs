//! Heading stream adapter
//!
//! Bridges the platform's sensor callback to compass observers. Every
//! rotation-vector sample is turned into a heading, stored as the latest
//! value and pushed to each subscriber in registration order. Other sensor
//! kinds and unusable samples leave everything untouched.
//!
//! # Example
//! ```
//! use std::sync::{Arc, Mutex};
//! use sight_compass::{Heading, HeadingStream, SensorKind};
//!
//! let stream = HeadingStream::new();
//! let received = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&received);
//! stream.subscribe(move |heading: Heading| sink.lock().unwrap().push(heading));
//!
//! // Upright in portrait, camera facing east
//! stream.on_sensor_sample(SensorKind::RotationVector, Some(&[0.5, -0.5, -0.5, 0.5]));
//! // Ignored: not a rotation vector
//! stream.on_sensor_sample(SensorKind::Accelerometer, Some(&[0.0, 0.0, 9.81]));
//!
//! assert_eq!(received.lock().unwrap().len(), 1);
//! assert!((stream.latest().degrees() - 90.0).abs() < 1e-3);
//! ```

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, trace, warn};

use crate::compass::Heading;
use crate::orientation::HeadingTransform;
use crate::sample::{RotationSample, SensorKind};
use crate::types::HeadingSettings;

/// Handle returned by [`HeadingStream::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(Heading) + Send + Sync>;

/// Latest-value compass heading with synchronous observers.
///
/// Safe to share between the sensor thread and UI threads. Reading the
/// latest heading never blocks; publishing holds the observer lock while it
/// stores the value and notifies, so observers see publishes in the same
/// order as the slot.
///
/// Observers run on the publishing thread with the observer lock held. They
/// must not call back into the same stream: `subscribe`, `unsubscribe`,
/// `observer_count`, `on_sensor_sample` and `publish` would all deadlock.
/// Reading [`HeadingStream::latest`] is fine.
pub struct HeadingStream {
    transform: HeadingTransform,
    latest: AtomicU32,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_id: AtomicU64,
}

impl HeadingStream {
    /// Create a stream with default (portrait) settings
    pub fn new() -> Self {
        Self::with_settings(HeadingSettings::default())
    }

    /// Create a stream with specified transform settings
    pub fn with_settings(settings: HeadingSettings) -> Self {
        Self {
            transform: HeadingTransform::with_settings(settings),
            latest: AtomicU32::new(Heading::NORTH.degrees().to_bits()),
            observers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Get the transform settings
    pub fn settings(&self) -> HeadingSettings {
        self.transform.settings()
    }

    /// Most recently published heading, north before the first sample.
    pub fn latest(&self) -> Heading {
        Heading::from_degrees(f32::from_bits(self.latest.load(Ordering::Acquire)))
    }

    /// Registers an observer called with every published heading.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(Heading) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock_observers().push((id, Box::new(observer)));
        debug!("Heading observer {:?} subscribed", id);
        id
    }

    /// Removes an observer. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.lock_observers();
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        let removed = observers.len() != before;
        if removed {
            debug!("Heading observer {:?} unsubscribed", id);
        }
        removed
    }

    pub fn observer_count(&self) -> usize {
        self.lock_observers().len()
    }

    /// Feeds one sensor event into the stream.
    ///
    /// Only rotation-vector events (type code 11, whether spelled
    /// [`SensorKind::RotationVector`] or `Other(11)`) with a usable sample are
    /// published. Everything else is a no-op: other sensor kinds, absent or
    /// empty samples, and malformed or overflowing samples (logged, never
    /// published).
    ///
    /// # Returns
    /// The published heading, or `None` when the event was ignored
    pub fn on_sensor_sample(&self, kind: SensorKind, sample: Option<&[f32]>) -> Option<Heading> {
        if !kind.is_rotation_vector() {
            trace!("Ignoring {:?} sensor event", kind);
            return None;
        }

        let values = match sample {
            Some(values) if !values.is_empty() => values,
            _ => {
                trace!("Ignoring empty rotation vector event");
                return None;
            }
        };

        let heading = match RotationSample::from_slice(values)
            .and_then(|sample| self.transform.heading(&sample))
        {
            Ok(heading) => heading,
            Err(err) => {
                warn!("Dropping rotation vector sample: {}", err);
                return None;
            }
        };

        self.publish(heading);
        Some(heading)
    }

    /// Stores a heading and notifies observers.
    pub fn publish(&self, heading: Heading) {
        let observers = self.lock_observers();
        self.latest.store(heading.degrees().to_bits(), Ordering::Release);
        debug!(
            "Publishing heading {:.1} to {} observers",
            heading,
            observers.len()
        );
        for (_, observer) in observers.iter() {
            observer(heading);
        }
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Observer)>> {
        // A panicking observer leaves the list itself intact
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HeadingStream {
    fn default() -> Self {
        Self::new()
    }
}
