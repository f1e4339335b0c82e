//! Carousel reconciler
//!
//! Translates the continuous horizontal offset of the cover carousel into
//! discrete track indexes. A drag gesture arrives as three ordered events:
//!
//! 1. `drag_begin` remembers which cover was centered
//! 2. `drag_end` picks the snap target, continuing a fast swipe to the
//!    neighbor cover even when the finger has not crossed the midpoint
//! 3. `drag_settle` decides whether the resting cover means a track switch
//!
//! Offsets are in the view's points; velocities in viewport widths per tick.

use crate::error::{PlaybackError, Result};
use crate::types::ScreenConfig;
use cadence_core::{Playlist, Track};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Read-only access to carousel items
///
/// Replaces the delegate/data-source pair of UI toolkits: the view asks how
/// many covers exist and what to draw for each, nothing more.
pub trait CarouselSource {
    /// Number of covers
    fn item_count(&self) -> usize;

    /// Cover at `index`
    fn item_at(&self, index: usize) -> Option<&Track>;
}

impl CarouselSource for Playlist {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn item_at(&self, index: usize) -> Option<&Track> {
        self.get(index)
    }
}

/// Page layout of the carousel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarouselGeometry {
    viewport_width: f64,
    horizontal_padding: f64,
}

impl CarouselGeometry {
    /// Create a geometry
    ///
    /// # Errors
    /// Returns `InvalidGeometry` when the page width would not be positive.
    pub fn new(viewport_width: f64, horizontal_padding: f64) -> Result<Self> {
        let geometry = Self {
            viewport_width,
            horizontal_padding,
        };
        let page_width = geometry.page_width();
        if !page_width.is_finite() || page_width <= 0.0 {
            return Err(PlaybackError::InvalidGeometry(format!(
                "viewport {} with padding {} gives page width {}",
                viewport_width, horizontal_padding, page_width
            )));
        }
        Ok(geometry)
    }

    /// Distance between two neighboring cover offsets
    pub fn page_width(&self) -> f64 {
        self.viewport_width - 1.5 * self.horizontal_padding
    }

    /// Side of a square cover cell
    pub fn cell_size(&self) -> f64 {
        self.viewport_width - 2.0 * self.horizontal_padding
    }

    /// Viewport width
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Horizontal padding
    pub fn horizontal_padding(&self) -> f64 {
        self.horizontal_padding
    }

    /// Content offset that rests on `index`
    pub fn offset_for(&self, index: usize) -> f64 {
        self.page_width() * index as f64
    }

    /// Nearest cover to `offset_x`, clamped to `[0, item_count - 1]`
    pub fn index_at(&self, offset_x: f64, item_count: usize) -> usize {
        let last = item_count.saturating_sub(1) as i64;
        // NaN rounds to NaN and casts to 0
        let raw = (offset_x / self.page_width()).round() as i64;
        raw.clamp(0, last) as usize
    }
}

/// How the view should move the carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScrollCommand {
    /// Standard animated scroll that centers `index`
    CenterOn {
        /// Cover to center
        index: usize,
    },

    /// Spring animation continuing a swipe, replacing momentum scrolling
    Spring {
        /// Cover to rest on
        index: usize,
        /// Target content offset
        offset_x: f64,
        /// Release velocity carried into the spring
        initial_velocity: f64,
        /// Animation duration in milliseconds
        duration_ms: u64,
        /// Spring damping ratio
        damping: f64,
    },
}

impl ScrollCommand {
    /// Cover the animation ends on
    pub fn target_index(&self) -> usize {
        match self {
            Self::CenterOn { index } | Self::Spring { index, .. } => *index,
        }
    }
}

/// What a settled drag means for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettleOutcome {
    /// Load and play this track
    Switch(usize),

    /// Dragged past the first or last cover and bounced back; nothing to do
    BoundaryBounce(usize),

    /// No drag was in progress
    Ignored,
}

/// Ephemeral state of one drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragState {
    index_before_drag: usize,
}

/// Maps scroll offsets to track indexes for one carousel
#[derive(Debug, Clone)]
pub struct CarouselReconciler {
    geometry: CarouselGeometry,
    swipe_velocity_threshold: f64,
    snap_duration_ms: u64,
    snap_damping: f64,
    drag: Option<DragState>,
}

impl CarouselReconciler {
    /// Create a reconciler from screen configuration
    pub fn new(config: &ScreenConfig) -> Result<Self> {
        Ok(Self {
            geometry: CarouselGeometry::new(config.viewport_width, config.horizontal_padding)?,
            swipe_velocity_threshold: config.swipe_velocity_threshold,
            snap_duration_ms: config.snap_duration_ms,
            snap_damping: config.snap_damping,
            drag: None,
        })
    }

    /// React to a new viewport width reported by the view
    ///
    /// A rejected width keeps the previous geometry.
    pub fn set_viewport_width(&mut self, viewport_width: f64) -> Result<()> {
        self.geometry = CarouselGeometry::new(viewport_width, self.geometry.horizontal_padding())?;
        Ok(())
    }

    /// Current geometry
    pub fn geometry(&self) -> &CarouselGeometry {
        &self.geometry
    }

    /// Whether a drag gesture is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Index the current gesture started from
    pub fn index_before_drag(&self) -> Option<usize> {
        self.drag.map(|d| d.index_before_drag)
    }

    /// Record the centered cover as the drag origin
    pub fn drag_begin(&mut self, offset_x: f64, item_count: usize) -> usize {
        let index_before_drag = self.geometry.index_at(offset_x, item_count);
        debug!("Drag began on cover {}", index_before_drag);
        self.drag = Some(DragState { index_before_drag });
        index_before_drag
    }

    /// Choose where the carousel comes to rest after the finger lifts
    ///
    /// A release faster than the threshold that has not yet crossed into the
    /// neighbor cover continues to that neighbor with a spring; everything
    /// else recenters on the cover nearest to `offset_x`.
    pub fn drag_end(&mut self, offset_x: f64, velocity_x: f64, item_count: usize) -> ScrollCommand {
        let index_of_major_cell = self.geometry.index_at(offset_x, item_count);
        let index_before_drag = self
            .drag
            .get_or_insert(DragState {
                index_before_drag: index_of_major_cell,
            })
            .index_before_drag;

        let threshold = self.swipe_velocity_threshold;
        let can_advance = index_before_drag + 1 < item_count && velocity_x > threshold;
        let can_retreat = index_before_drag >= 1 && velocity_x < -threshold;
        let major_is_origin = index_of_major_cell == index_before_drag;
        let used_swipe_skip = major_is_origin && (can_advance || can_retreat);

        if used_swipe_skip {
            let index = if can_advance {
                index_before_drag + 1
            } else {
                index_before_drag - 1
            };
            debug!("Swipe continues from cover {} to {}", index_before_drag, index);
            ScrollCommand::Spring {
                index,
                offset_x: self.geometry.offset_for(index),
                initial_velocity: velocity_x,
                duration_ms: self.snap_duration_ms,
                damping: self.snap_damping,
            }
        } else {
            debug!("Recentering on cover {}", index_of_major_cell);
            ScrollCommand::CenterOn {
                index: index_of_major_cell,
            }
        }
    }

    /// Decide what the resting position means and end the gesture
    ///
    /// Resting on the origin cover at either end of the carousel is a bounce
    /// and changes nothing. Any other resting cover, including the origin in
    /// the middle of the carousel, restarts playback on that cover.
    pub fn drag_settle(&mut self, offset_x: f64, item_count: usize) -> SettleOutcome {
        let Some(drag) = self.drag.take() else {
            return SettleOutcome::Ignored;
        };

        let index = self.geometry.index_at(offset_x, item_count);
        let before = drag.index_before_drag;
        let last = item_count.saturating_sub(1);

        if index == before && (before == 0 || before == last) {
            debug!("Drag settled back on edge cover {}", index);
            SettleOutcome::BoundaryBounce(index)
        } else {
            debug!("Drag settled on cover {} (from {})", index, before);
            SettleOutcome::Switch(index)
        }
    }

    /// Abandon the current gesture without a settle
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }
}
