//! Two-pick vertical measurement.
//!
//! Picks arrive one at a time from the rendering surface. The first pick of a
//! pair is held; the second completes the pair, produces a [`Measurement`],
//! swaps the single live [`MeasurementMarker`] and returns the pipeline to the
//! empty state in the same call.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::record::Point3;

/// Number of decimals measurements are reported with.
pub const DISTANCE_DECIMALS: i32 = 3;

/// The line artifact connecting the two picks of the latest measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasurementMarker {
    pub from: Point3,
    pub to: Point3,
}

/// A completed measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    pub from: Point3,
    pub to: Point3,
    /// Vertical separation in real units, rounded to three decimals.
    pub distance: f64,
}

impl Measurement {
    /// The marker drawn for this measurement.
    #[must_use]
    pub fn marker(&self) -> MeasurementMarker {
        MeasurementMarker {
            from: self.from,
            to: self.to,
        }
    }
}

/// Result of feeding one pick into the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickOutcome {
    /// First point of a pair recorded.
    Pending { first: Point3 },
    /// Pair completed. `released` is the previous marker, already dropped
    /// from the pipeline, which the caller must remove from its surface
    /// before drawing the new one.
    Completed {
        measurement: Measurement,
        released: Option<MeasurementMarker>,
    },
}

/// Externally observable pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickState {
    Empty,
    OnePoint,
}

/// Rounds `value` to [`DISTANCE_DECIMALS`] places.
#[must_use]
pub fn round_distance(value: f64) -> f64 {
    let factor = 10f64.powi(DISTANCE_DECIMALS);
    (value * factor).round() / factor
}

/// `|scale_factor * (to.z - from.z)|`, rounded.
///
/// Picks come from the rendered cloud whose Z was divided by `scale_factor`
/// at load time, so this restores real vertical units.
#[must_use]
pub fn vertical_distance(from: Point3, to: Point3, scale_factor: f64) -> f64 {
    round_distance((scale_factor * (to.z - from.z)).abs())
}

/// Pick accumulator plus ownership of the single live marker.
#[derive(Debug, Clone)]
pub struct MeasurementPipeline {
    scale_factor: f64,
    pending: Option<Point3>,
    marker: Option<MeasurementMarker>,
}

impl MeasurementPipeline {
    /// Creates an empty pipeline using `scale_factor` to undo Z compression.
    #[must_use]
    pub fn new(scale_factor: f64) -> Self {
        Self {
            scale_factor,
            pending: None,
            marker: None,
        }
    }

    /// Scale factor applied to Z differences.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PickState {
        if self.pending.is_some() {
            PickState::OnePoint
        } else {
            PickState::Empty
        }
    }

    /// Picks waiting for their pair (zero or one).
    #[must_use]
    pub fn pending_picks(&self) -> &[Point3] {
        self.pending.as_slice()
    }

    /// The live marker, if any measurement has completed.
    #[must_use]
    pub fn active_marker(&self) -> Option<&MeasurementMarker> {
        self.marker.as_ref()
    }

    /// Feeds a pick.
    ///
    /// In `Empty` this starts a new pair; in `OnePoint` it always completes it.
    pub fn pick(&mut self, point: Point3) -> PickOutcome {
        let Some(first) = self.pending.take() else {
            self.pending = Some(point);
            return PickOutcome::Pending { first: point };
        };

        let measurement = Measurement {
            from: first,
            to: point,
            distance: vertical_distance(first, point, self.scale_factor),
        };
        let released = self.marker.take();
        self.marker = Some(measurement.marker());
        log::debug!("measured vertical distance {:.3}", measurement.distance);

        PickOutcome::Completed {
            measurement,
            released,
        }
    }

    /// Drops pending picks and releases the live marker.
    pub fn reset(&mut self) -> Option<MeasurementMarker> {
        self.pending = None;
        self.marker.take()
    }
}
