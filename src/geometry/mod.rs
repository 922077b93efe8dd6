//! Geometric primitives for screenplay layout analysis.
//!
//! Coordinates are page-relative with the origin at the top-left corner, so `y`
//! grows down the page. This is the orientation extraction collaborators hand
//! back after normalising PDF user space.

use serde::{Deserialize, Serialize};

/// Bounding box of a text fragment on a page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from two corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// use screenplay_oxide::geometry::BBox;
    ///
    /// let bbox = BBox::new(108.0, 72.0, 300.0, 84.0);
    /// assert_eq!(bbox.width(), 192.0);
    /// assert_eq!(bbox.height(), 12.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a bounding box from an origin and dimensions.
    pub fn from_origin(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + width,
            y1: y + height,
        }
    }

    /// Get the left edge x-coordinate (the classification column).
    pub fn left(&self) -> f32 {
        self.x0
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x1
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y0
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y1
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Check whether another box sits on the same visual line.
    ///
    /// Two boxes share a line when their top edges differ by less than `epsilon`.
    ///
    /// # Examples
    ///
    /// ```
    /// use screenplay_oxide::geometry::BBox;
    ///
    /// let a = BBox::new(108.0, 100.0, 200.0, 112.0);
    /// let b = BBox::new(210.0, 100.8, 260.0, 112.8);
    /// let c = BBox::new(108.0, 114.0, 200.0, 126.0);
    ///
    /// assert!(a.shares_line_with(&b, 2.0));
    /// assert!(!a.shares_line_with(&c, 2.0));
    /// ```
    pub fn shares_line_with(&self, other: &BBox, epsilon: f32) -> bool {
        (self.y0 - other.y0).abs() < epsilon
    }

    /// Compute the smallest box covering both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}
