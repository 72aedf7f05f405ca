//! Land-use stamping.
//!
//! A [`Stamp`] writes a feature's elevation and [`ElementType`] onto a
//! sub-region of the height and type grids. Which cells a stamp may claim is
//! stated by its [`StampPolicy`] instead of being implied by call order:
//! roads, water and buildings overwrite anything, lawns only claim plain land.
//!
//! All footprints are clipped to the grid; cells outside are skipped.

use std::ops::Range;

use landform_config::{FeatureLayout, TerrainConfig};
use tracing::{debug, warn};

use crate::element::ElementType;
use crate::grid::{HeightGrid, HeightRange, TypeGrid};

/// Which existing cell codes a stamp is allowed to replace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StampPolicy {
    /// Write every cell in the footprint.
    Overwrite,
    /// Write only cells whose current code is listed.
    ClaimOnly(&'static [ElementType]),
}

impl StampPolicy {
    /// Returns `true` if a cell currently holding `current` may be written.
    pub fn admits(&self, current: ElementType) -> bool {
        match self {
            Self::Overwrite => true,
            Self::ClaimOnly(claimable) => claimable.contains(&current),
        }
    }
}

/// A single feature stamp in grid-cell coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Stamp {
    /// Rows `[r - length/2, r + length/2)`, cols `[c - width/2, c + width/2)`,
    /// flattened to `level`.
    Road {
        center: (isize, isize),
        length: usize,
        width: usize,
        level: f32,
    },
    /// Disc of `radius` cells, depressed below `floor` by up to `depth` at
    /// the center.
    Water {
        center: (isize, isize),
        radius: usize,
        depth: f32,
        floor: f32,
    },
    /// Disc of `radius` cells; type only, heights untouched.
    Lawn { center: (isize, isize), radius: usize },
    /// `width × depth` rectangle from `origin`, raised to `height` with the
    /// middle half stepped up two more units.
    Building {
        origin: (isize, isize),
        width: usize,
        depth: usize,
        height: f32,
    },
}

/// Extra elevation of a building pad's inner step.
const BUILDING_STEP: f32 = 2.0;

struct CellEdit {
    height: Option<f32>,
}

impl Stamp {
    /// Code written into claimed cells.
    pub fn element(&self) -> ElementType {
        match self {
            Self::Road { .. } => ElementType::Road,
            Self::Water { .. } => ElementType::WaterPool,
            Self::Lawn { .. } => ElementType::Lawn,
            Self::Building { .. } => ElementType::Building,
        }
    }

    /// Claim rule for this stamp.
    pub fn policy(&self) -> StampPolicy {
        match self {
            Self::Lawn { .. } => StampPolicy::ClaimOnly(&[ElementType::Land]),
            _ => StampPolicy::Overwrite,
        }
    }

    /// Half-open `(rows, cols)` bounding box of the footprint, unclipped.
    ///
    /// Extents saturate at the `isize` limits.
    fn bounds(&self) -> ((isize, isize), (isize, isize)) {
        match *self {
            Self::Road {
                center: (r, c),
                length,
                width,
                ..
            } => {
                let hl = cells(length / 2);
                let hw = cells(width / 2);
                (
                    (r.saturating_sub(hl), r.saturating_add(hl)),
                    (c.saturating_sub(hw), c.saturating_add(hw)),
                )
            }
            Self::Water {
                center: (r, c),
                radius,
                ..
            }
            | Self::Lawn {
                center: (r, c),
                radius,
            } => {
                let rad = cells(radius);
                (
                    (r.saturating_sub(rad), r.saturating_add(rad).saturating_add(1)),
                    (c.saturating_sub(rad), c.saturating_add(rad).saturating_add(1)),
                )
            }
            Self::Building {
                origin: (r, c),
                width,
                depth,
                ..
            } => (
                (r, r.saturating_add(cells(width))),
                (c, c.saturating_add(cells(depth))),
            ),
        }
    }

    /// Footprint rows and columns clipped to a `size × size` grid, or `None`
    /// when nothing of it lies inside.
    fn clipped_bounds(&self, size: usize) -> Option<(Range<usize>, Range<usize>)> {
        let n = cells(size);
        let ((r0, r1), (c0, c1)) = self.bounds();
        let rows = r0.clamp(0, n) as usize..r1.clamp(0, n) as usize;
        let cols = c0.clamp(0, n) as usize..c1.clamp(0, n) as usize;
        (!rows.is_empty() && !cols.is_empty()).then_some((rows, cols))
    }

    /// Returns `true` if any part of the footprint lies inside a
    /// `size × size` grid.
    pub fn intersects(&self, size: usize) -> bool {
        self.clipped_bounds(size).is_some()
    }

    /// Edit for `(row, col)`, or `None` outside the footprint.
    fn edit_at(&self, row: isize, col: isize) -> Option<CellEdit> {
        match *self {
            Self::Road { level, .. } => Some(CellEdit {
                height: Some(level),
            }),
            Self::Water {
                center,
                radius,
                depth,
                floor,
            } => {
                let d = distance(center, row, col);
                if d > radius as f32 {
                    return None;
                }
                let max_range = radius as f32 * std::f32::consts::SQRT_2;
                let rate = if max_range > 0.0 {
                    d / max_range
                } else {
                    0.0
                };
                Some(CellEdit {
                    height: Some(floor - (1.0 - rate) * depth),
                })
            }
            Self::Lawn { center, radius } => {
                (distance(center, row, col) <= radius as f32).then_some(CellEdit { height: None })
            }
            Self::Building {
                origin: (r0, c0),
                width,
                depth,
                height,
            } => {
                let (wq, dq) = (cells(width / 4), cells(depth / 4));
                let on_step = row > r0.saturating_add(wq)
                    && row <= r0.saturating_add(wq.saturating_mul(3))
                    && col > c0.saturating_add(dq)
                    && col <= c0.saturating_add(dq.saturating_mul(3));
                Some(CellEdit {
                    height: Some(if on_step { height + BUILDING_STEP } else { height }),
                })
            }
        }
    }
}

/// A cell count as a signed extent, saturating at `isize::MAX`.
#[inline]
fn cells(count: usize) -> isize {
    isize::try_from(count).unwrap_or(isize::MAX)
}

#[inline]
fn distance((r, c): (isize, isize), row: isize, col: isize) -> f32 {
    let dr = row.saturating_sub(r) as f32;
    let dc = col.saturating_sub(c) as f32;
    (dr * dr + dc * dc).sqrt()
}

/// Apply one stamp in place. Returns the number of cells written.
pub fn stamp(heights: &mut HeightGrid, types: &mut TypeGrid, stamp: &Stamp) -> usize {
    let policy = stamp.policy();
    let element = stamp.element();
    let Some((rows, cols)) = stamp.clipped_bounds(types.size()) else {
        return 0;
    };
    let mut written = 0;
    for row in rows {
        for col in cols.clone() {
            if !policy.admits(types.get(row, col)) {
                continue;
            }
            let (r, c) = (row as isize, col as isize);
            let Some(edit) = stamp.edit_at(r, c) else {
                continue;
            };
            if let Some(h) = edit.height {
                heights.try_set(r, c, h);
            }
            types.try_set(r, c, element);
            written += 1;
        }
    }
    written
}

/// Cells written by each stamp of a layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayReport {
    pub road: usize,
    pub water: usize,
    pub lawn: usize,
    pub building: usize,
}

impl OverlayReport {
    pub fn total(&self) -> usize {
        self.road + self.water + self.lawn + self.building
    }
}

fn cell_of(fraction: [f32; 2], size: usize) -> (isize, isize) {
    let n = size as f32;
    ((fraction[0] * n).floor() as isize, (fraction[1] * n).floor() as isize)
}

/// Resolve a layout into stamps for a `size × size` grid, in stamping order.
///
/// `range` is the height range observed after synthesis: roads flatten to its
/// midpoint and water sinks below its minimum.
pub fn layout_stamps(layout: &FeatureLayout, size: usize, range: HeightRange) -> Vec<Stamp> {
    let mut stamps = Vec::with_capacity(4);
    if let Some(road) = &layout.road {
        stamps.push(Stamp::Road {
            center: cell_of(road.center, size),
            length: (road.length * size as f32).floor() as usize,
            width: road.width,
            level: range.midpoint(),
        });
    }
    if let Some(water) = &layout.water {
        stamps.push(Stamp::Water {
            center: cell_of(water.center, size),
            radius: water.radius,
            depth: water.depth,
            floor: range.min,
        });
    }
    if let Some(lawn) = &layout.lawn {
        stamps.push(Stamp::Lawn {
            center: cell_of(lawn.center, size),
            radius: lawn.radius,
        });
    }
    if let Some(building) = &layout.building {
        stamps.push(Stamp::Building {
            origin: cell_of(building.origin, size),
            width: building.width,
            depth: building.depth,
            height: building.height,
        });
    }
    stamps
}

/// Stamp every feature of `layout` in order road, water, lawn, building.
pub fn apply_layout(
    heights: &mut HeightGrid,
    types: &mut TypeGrid,
    layout: &FeatureLayout,
    range: HeightRange,
) -> OverlayReport {
    let size = heights.size();
    let mut report = OverlayReport::default();
    for s in layout_stamps(layout, size, range) {
        if !s.intersects(size) {
            warn!(element = ?s.element(), size, "feature stamp lies entirely outside the grid");
        }
        let written = stamp(heights, types, &s);
        match s.element() {
            ElementType::Road => report.road = written,
            ElementType::WaterPool => report.water = written,
            ElementType::Lawn => report.lawn = written,
            _ => report.building = written,
        }
    }
    debug!(?report, "overlays applied");
    report
}

/// Range every height stays within once overlays have run.
///
/// `[MIN_HEIGHT - water.depth, max(max_height, building.height + 2)]`.
pub fn admissible_bounds(config: &TerrainConfig) -> HeightRange {
    let layout = &config.features;
    let depth = layout.water.as_ref().map_or(0.0, |w| w.depth);
    let top = layout
        .building
        .as_ref()
        .map_or(config.max_height, |b| config.max_height.max(b.height + BUILDING_STEP));
    HeightRange::new(TerrainConfig::MIN_HEIGHT - depth, top)
}
