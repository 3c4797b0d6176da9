//! Raw decoded point data in Structure of Arrays (`SoA`) layout.
//!
//! A [`RawCloud`] is what a file reader produces before any normalisation:
//! integer coordinates exactly as stored, the per-axis scale/offset pair from
//! the header and, when the point format declares them, 16-bit colour columns.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-axis `real = raw * scale + offset` transform.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisTransform {
    pub scale: f64,
    pub offset: f64,
}

impl Default for AxisTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
        }
    }
}

impl AxisTransform {
    /// Creates a transform from scale and offset.
    #[must_use]
    pub fn new(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }

    /// Applies the transform to a stored integer coordinate.
    #[inline]
    #[must_use]
    pub fn apply(&self, raw: i32) -> f64 {
        f64::from(raw) * self.scale + self.offset
    }
}

/// Columnar colour channels, one entry per point.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawColors {
    pub red: Vec<u16>,
    pub green: Vec<u16>,
    pub blue: Vec<u16>,
}

impl RawColors {
    /// Creates empty channels with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            red: Vec::with_capacity(capacity),
            green: Vec::with_capacity(capacity),
            blue: Vec::with_capacity(capacity),
        }
    }

    /// Number of colour entries (taken from the red channel).
    #[must_use]
    pub fn len(&self) -> usize {
        self.red.len()
    }

    /// Returns true if no colours are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    /// Returns true if all three channels have the same length.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.red.len() == self.green.len() && self.red.len() == self.blue.len()
    }

    /// Pushes a single colour.
    pub fn push(&mut self, red: u16, green: u16, blue: u16) {
        self.red.push(red);
        self.green.push(green);
        self.blue.push(blue);
    }
}

/// A decoded but not yet normalised point cloud.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawCloud {
    /// Columnar storage for stored X integers.
    pub x: Vec<i32>,
    /// Columnar storage for stored Y integers.
    pub y: Vec<i32>,
    /// Columnar storage for stored Z integers.
    pub z: Vec<i32>,
    /// Header transforms for X, Y and Z.
    pub transforms: [AxisTransform; 3],
    /// Colour columns, present only if the point format declares RGB.
    pub colors: Option<RawColors>,
}

impl RawCloud {
    /// Creates an empty cloud with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize, transforms: [AxisTransform; 3], has_color: bool) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
            transforms,
            colors: has_color.then(|| RawColors::with_capacity(capacity)),
        }
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if the cloud holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Pushes a single point.
    ///
    /// The colour is dropped if the cloud was created without colour columns.
    pub fn push(&mut self, xyz: [i32; 3], color: Option<[u16; 3]>) {
        self.x.push(xyz[0]);
        self.y.push(xyz[1]);
        self.z.push(xyz[2]);
        if let (Some(colors), Some([r, g, b])) = (self.colors.as_mut(), color) {
            colors.push(r, g, b);
        }
    }

    /// Real-unit coordinates of point `index` (no Z compression applied).
    #[must_use]
    pub fn real(&self, index: usize) -> [f64; 3] {
        let [tx, ty, tz] = self.transforms;
        [
            tx.apply(self.x[index]),
            ty.apply(self.y[index]),
            tz.apply(self.z[index]),
        ]
    }
}
