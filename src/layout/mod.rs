//! Layout analysis for positioned screenplay pages.
//!
//! This module provides the geometry-facing half of the engine:
//! - Positioned fragments as delivered by the extraction collaborator
//! - Layout profiles (horizontal bands per element type, one per authoring tool)
//! - Authoring-tool detection from document metadata
//! - Line reconstruction (fragments → logical lines)

pub mod element;
pub mod line_builder;
pub mod profile;
pub mod source_detector;

// Re-export main types
pub use element::{PositionedElement, BOLD_WEIGHT};
pub use line_builder::{reconstruct_lines, validate_reading_order, LogicalLine, DEFAULT_LINE_EPSILON};
pub use profile::{Band, LayoutProfile, ProfileId, ProfileRegistry};
pub use source_detector::detect_profile;
