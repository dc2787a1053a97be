//! Placement of main strands and their tails on the grid
//!
//! Right-handed formulas are primary; a left-handed layout is the
//! right-handed one reflected across the vertical line through its center.

use crate::geometry::Point2D;
use crate::io::configuration::{DEFAULT_ORIGIN, STRETCH_CENTER, STRETCH_TAIL_OFFSET};
use crate::pattern::config::{Axis, Chirality, GeneratorConfig, LayoutVariant, ROLE_TAIL_A, ROLE_TAIL_B};
use crate::strand::curve::Endpoint;

/// A tail leaving one end of a main strand
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TailPlacement {
    /// `_2` or `_3`
    pub role: u32,
    /// Main strand endpoint the tail starts from
    pub side: Endpoint,
    /// Free end of the tail
    pub end: Point2D,
}

/// Main strand and tails of one set
#[derive(Clone, Debug, PartialEq)]
pub struct SetPlacement {
    /// Set number shared by the strands
    pub set_number: u32,
    /// Grid direction
    pub axis: Axis,
    /// Main strand start
    pub start: Point2D,
    /// Main strand end
    pub end: Point2D,
    /// Both tails
    pub tails: [TailPlacement; 2],
}

impl SetPlacement {
    /// Position of a main strand endpoint
    pub const fn endpoint(&self, which: Endpoint) -> Point2D {
        match which {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    fn reflect(&mut self, axis_x: f64) {
        let mirror = |p: Point2D| Point2D::new(2.0f64.mul_add(axis_x, -p.x), p.y);
        self.start = mirror(self.start);
        self.end = mirror(self.end);
        for tail in &mut self.tails {
            tail.end = mirror(tail.end);
        }
    }
}

/// Place every set of the configured grid, vertical sets first
pub fn place_sets(config: &GeneratorConfig) -> Vec<SetPlacement> {
    let mut sets = match config.variant {
        LayoutVariant::Systematic => systematic(config),
        LayoutVariant::Stretch => stretch(config),
    };

    if config.chirality == Chirality::LeftHanded {
        let xs = sets.iter().flat_map(|set| [set.start.x, set.end.x]);
        let (min, max) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
        if min.is_finite() && max.is_finite() {
            let axis_x = f64::midpoint(min, max);
            for set in &mut sets {
                set.reflect(axis_x);
            }
        }
    }
    sets
}

fn systematic(config: &GeneratorConfig) -> Vec<SetPlacement> {
    let (m, n) = (config.m as f64, config.n as f64);
    let spacing = config.base_spacing;
    let vg = config.vertical_gap;
    let hg = config.horizontal_gap;
    let mut sets = Vec::with_capacity(config.m + config.n);

    for i in 0..config.m {
        let x = spacing.mul_add(i as f64, DEFAULT_ORIGIN) - 2.0 * hg;
        let y = DEFAULT_ORIGIN - ((n - 1.0) * 4.0).mul_add(vg, 2.0 * vg);
        let start = Point2D::new(x + vg, y);
        let end = Point2D::new(x - vg, ((n - 1.0) * 4.0).mul_add(vg, y - spacing));

        let offset = offset_at(&config.vertical_offsets, i);
        let paired = offset_at(&config.vertical_offsets, config.m - 1 - i);
        sets.push(SetPlacement {
            set_number: set_number(i + 1),
            axis: Axis::Vertical,
            start,
            end,
            tails: [
                TailPlacement {
                    role: ROLE_TAIL_A,
                    side: Endpoint::Start,
                    end: Point2D::new(2.0f64.mul_add(vg, end.x), 0.5f64.mul_add(vg, end.y) - offset),
                },
                TailPlacement {
                    role: ROLE_TAIL_B,
                    side: Endpoint::End,
                    end: Point2D::new(2.0f64.mul_add(-vg, start.x), 0.5f64.mul_add(-vg, start.y) + paired),
                },
            ],
        });
    }

    for i in 0..config.n {
        let x = ((m - 1.0) * 4.0).mul_add(vg, DEFAULT_ORIGIN) - (m - 1.0) * 4.0 * hg;
        let y = spacing.mul_add(i as f64, DEFAULT_ORIGIN);
        let start = Point2D::new(x, y + hg);
        let end = Point2D::new(x + ((m - 1.0) * 4.0).mul_add(-vg, spacing), y - hg);

        let offset = offset_at(&config.horizontal_offsets, i);
        let paired = offset_at(&config.horizontal_offsets, config.n - 1 - i);
        sets.push(SetPlacement {
            set_number: set_number(config.m + i + 1),
            axis: Axis::Horizontal,
            start,
            end,
            tails: [
                TailPlacement {
                    role: ROLE_TAIL_A,
                    side: Endpoint::Start,
                    end: Point2D::new(0.5f64.mul_add(-hg, end.x) + offset, 2.0f64.mul_add(hg, end.y)),
                },
                TailPlacement {
                    role: ROLE_TAIL_B,
                    side: Endpoint::End,
                    end: Point2D::new(0.5f64.mul_add(hg, start.x) - paired, 2.0f64.mul_add(-hg, start.y)),
                },
            ],
        });
    }

    sets
}

fn stretch(config: &GeneratorConfig) -> Vec<SetPlacement> {
    let (m, n) = (config.m as f64, config.n as f64);
    let gap = config.vertical_gap;
    let stride = 4.0 * gap.abs();
    let (center_x, center_y) = STRETCH_CENTER;
    let overrun = STRETCH_TAIL_OFFSET;
    let mut sets = Vec::with_capacity(config.m + config.n);

    for i in 0..config.m {
        let x = (i as f64 - (m - 1.0) / 2.0).mul_add(stride, center_x);
        let top = ((n - 1.0) / 2.0).mul_add(-stride, center_y) - stride / 2.0;
        let bottom = ((n - 1.0) / 2.0).mul_add(stride, center_y) + stride / 2.0;
        let start = Point2D::new(x + gap, bottom);
        let end = Point2D::new(x - gap, top);

        sets.push(SetPlacement {
            set_number: set_number(config.n + i + 1),
            axis: Axis::Vertical,
            start,
            end,
            tails: [
                TailPlacement {
                    role: ROLE_TAIL_A,
                    side: Endpoint::End,
                    end: Point2D::new(end.x, start.y + overrun),
                },
                TailPlacement {
                    role: ROLE_TAIL_B,
                    side: Endpoint::Start,
                    end: Point2D::new(start.x, end.y - overrun),
                },
            ],
        });
    }

    let half_width = (m - 1.0).mul_add(stride, stride) / 2.0;
    for i in 0..config.n {
        let y = (i as f64 - (n - 1.0) / 2.0).mul_add(stride, center_y);
        let start = Point2D::new(center_x - half_width, y + gap);
        let end = Point2D::new(center_x + half_width, y - gap);

        sets.push(SetPlacement {
            set_number: set_number(i + 1),
            axis: Axis::Horizontal,
            start,
            end,
            tails: [
                TailPlacement {
                    role: ROLE_TAIL_A,
                    side: Endpoint::End,
                    end: Point2D::new(start.x - overrun, end.y),
                },
                TailPlacement {
                    role: ROLE_TAIL_B,
                    side: Endpoint::Start,
                    end: Point2D::new(end.x + overrun, start.y),
                },
            ],
        });
    }

    sets
}

fn offset_at(offsets: &[f64], index: usize) -> f64 {
    offsets.get(index).copied().unwrap_or(0.0)
}

fn set_number(one_based: usize) -> u32 {
    u32::try_from(one_based).unwrap_or(u32::MAX)
}
