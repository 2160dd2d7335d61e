//! Block terrain used as the static collision world.
//!
//! The terrain is a grid of cubic blocks, each optionally carrying a top-face
//! gradient so ramps can be expressed. Vertical casts land on the (possibly
//! sloped) floor of the tallest block in a column; any other cast is tested
//! against the block boxes and the optional ground plane.

use bevy::prelude::{Resource, Vec3};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::probe::{CollisionChannel, CollisionProbe, ProbeResult};
use crate::{BLOCK_SIZE, BLOCK_TOP_OFFSET, GEOMETRY_EPSILON};

/// A single terrain block in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    /// Stable identifier used to attach a [`BlockSlope`].
    pub id: i64,
    /// Grid column along X.
    pub x: i32,
    /// Grid column along Y.
    pub y: i32,
    /// Grid layer along Z.
    pub z: i32,
}

/// Gradient of a block's top face, as rise per unit of run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockSlope {
    /// Block the gradient belongs to.
    pub block_id: i64,
    /// Rise per unit of run along X.
    pub grad_x: f32,
    /// Rise per unit of run along Y.
    pub grad_y: f32,
}

/// Static collision world made of blocks over an optional ground plane.
#[derive(Resource, Debug, Clone)]
pub struct BlockTerrain {
    block_size: f32,
    ground_height: Option<f32>,
    blocks: Vec<Block>,
    slopes: HashMap<i64, BlockSlope>,
    tallest: HashMap<(i32, i32), usize>,
}

impl Default for BlockTerrain {
    fn default() -> Self {
        Self::new(BLOCK_SIZE)
    }
}

impl BlockTerrain {
    /// Empty terrain with a ground plane at zero height.
    #[must_use]
    pub fn new(block_size: f32) -> Self {
        Self {
            block_size,
            ground_height: Some(0.0),
            blocks: Vec::new(),
            slopes: HashMap::new(),
            tallest: HashMap::new(),
        }
    }

    /// Replaces the ground plane; `None` leaves a void below the blocks.
    #[must_use]
    pub const fn with_ground(mut self, ground_height: Option<f32>) -> Self {
        self.ground_height = ground_height;
        self
    }

    /// Adds a block, returning `self` for chaining.
    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.insert_block(block);
        self
    }

    /// Adds a block with a sloped top face.
    #[must_use]
    pub fn with_ramp(mut self, block: Block, grad_x: f32, grad_y: f32) -> Self {
        self.slopes.insert(
            block.id,
            BlockSlope {
                block_id: block.id,
                grad_x,
                grad_y,
            },
        );
        self.insert_block(block);
        self
    }

    /// Inserts a block into the grid.
    pub fn insert_block(&mut self, block: Block) {
        let index = self.blocks.len();
        self.blocks.push(block);
        let column = (block.x, block.y);
        let taller = self
            .tallest
            .get(&column)
            .and_then(|&current| self.blocks.get(current))
            .is_none_or(|current| block.z > current.z);
        if taller {
            self.tallest.insert(column, index);
        }
    }

    /// Edge length of one block in world units.
    #[must_use]
    pub const fn block_size(&self) -> f32 {
        self.block_size
    }

    fn column_of(&self, x: f32, y: f32) -> (i32, i32) {
        let to_cell = |value: f32| {
            let cell = (value / self.block_size).floor();
            // Saturating float-to-int cast keeps far-off queries in range.
            cell as i32
        };
        (to_cell(x), to_cell(y))
    }

    fn tallest_block_at(&self, x: f32, y: f32) -> Option<&Block> {
        self.tallest
            .get(&self.column_of(x, y))
            .and_then(|&index| self.blocks.get(index))
    }

    /// Height of the walkable surface at a world position, with its normal.
    ///
    /// Sloped blocks rise from the block's minimum corner along their
    /// gradient. Columns without blocks fall back to the ground plane.
    #[must_use]
    pub fn floor_at(&self, x: f32, y: f32) -> Option<(f32, Vec3)> {
        let Some(block) = self.tallest_block_at(x, y) else {
            return self.ground_height.map(|height| (height, Vec3::Z));
        };
        let size = self.block_size;
        let base = (block.z as f32 + BLOCK_TOP_OFFSET) * size;
        let floor = self.slopes.get(&block.id).map_or((base, Vec3::Z), |slope| {
            let height = base
                + (x - block.x as f32 * size) * slope.grad_x
                + (y - block.y as f32 * size) * slope.grad_y;
            let normal = Vec3::new(-slope.grad_x, -slope.grad_y, 1.0).normalize();
            (height, normal)
        });
        Some(floor)
    }

    fn cast_vertical(&self, from: Vec3, to: Vec3) -> ProbeResult {
        let Some((height, normal)) = self.floor_at(from.x, from.y) else {
            return ProbeResult::miss();
        };
        let (low, high) = if from.z <= to.z {
            (from.z, to.z)
        } else {
            (to.z, from.z)
        };
        if height < low || height > high {
            return ProbeResult::miss();
        }
        ProbeResult::hit(Vec3::new(from.x, from.y, height), normal)
    }

    fn cast_swept(&self, from: Vec3, to: Vec3) -> ProbeResult {
        let delta = to - from;
        let size = self.block_size;
        let mut nearest: Option<(f32, Vec3)> = self
            .blocks
            .iter()
            .filter_map(|block| {
                let min = Vec3::new(block.x as f32, block.y as f32, block.z as f32) * size;
                segment_box_entry(from, delta, min, min + Vec3::splat(size))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0));

        if let Some(ground) = self.ground_height {
            if delta.z < 0.0 && from.z >= ground && to.z <= ground {
                let t = (from.z - ground) / -delta.z;
                if nearest.is_none_or(|(best, _)| t < best) {
                    nearest = Some((t, Vec3::Z));
                }
            }
        }

        nearest.map_or_else(ProbeResult::miss, |(t, normal)| {
            ProbeResult::hit(from + delta * t, normal)
        })
    }
}

/// Entry parameter and face normal where a segment first enters a box.
///
/// Segments starting inside the box report no entry.
fn segment_box_entry(origin: Vec3, delta: Vec3, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;
    let mut normal = None;

    let starts = origin.to_array().into_iter().zip(delta.to_array());
    let slabs = min.to_array().into_iter().zip(max.to_array());
    for (unit, ((start, step), (low, high))) in Vec3::AXES.into_iter().zip(starts.zip(slabs)) {
        if step.abs() <= GEOMETRY_EPSILON {
            if start < low || start > high {
                return None;
            }
            continue;
        }
        let (near, far) = {
            let a = (low - start) / step;
            let b = (high - start) / step;
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        };
        if near > t_enter || (normal.is_none() && near >= t_enter) {
            t_enter = near;
            normal = Some(unit * -step.signum());
        }
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    normal.map(|face| (t_enter, face))
}

impl CollisionProbe for BlockTerrain {
    fn cast_ray(&self, from: Vec3, to: Vec3, channel: CollisionChannel) -> ProbeResult {
        if channel != CollisionChannel::WorldStatic {
            return ProbeResult::miss();
        }
        let horizontal = (to - from).truncate();
        if horizontal.length() <= GEOMETRY_EPSILON {
            self.cast_vertical(from, to)
        } else {
            self.cast_swept(from, to)
        }
    }
}
