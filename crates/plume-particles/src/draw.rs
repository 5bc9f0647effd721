//! Packing live particles into instance data for the render layer

use crate::emitter::EmitterKind;
use crate::particle::{SmokeParticle, WaterDrop};
use bytemuck::{Pod, Zeroable};
use plume_core::Color;

/// Texture slot written for particles that have no texture
pub const NO_TEXTURE: u32 = u32::MAX;

/// Per-particle instance data, 48 bytes (3 rows of vec4)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// xyz = position, w = point size
    pub pos_size: [f32; 4],
    /// rgba
    pub color: [f32; 4],
    /// x = texture handle or `NO_TEXTURE`, rest unused
    pub texture: [u32; 4],
}

impl ParticleInstance {
    pub fn from_drop(drop: &WaterDrop, color: Color, size: f32) -> Self {
        let p = drop.position;
        Self {
            pos_size: [p.x, p.y, p.z, size],
            color: color.to_rgba(1.0),
            texture: [NO_TEXTURE, 0, 0, 0],
        }
    }

    pub fn from_smoke(puff: &SmokeParticle, size: f32) -> Self {
        let p = puff.position;
        let texture = puff.texture.map_or(NO_TEXTURE, |t| t.0);
        Self {
            pos_size: [p.x, p.y, p.z, size],
            color: puff.color.to_rgba(puff.alpha),
            texture: [texture, 0, 0, 0],
        }
    }
}

/// Draw data for one emitter, consumed by the renderer
pub struct ParticleDrawData<'a> {
    pub emitter: EmitterKind,
    pub instances: &'a [ParticleInstance],
}

/// Reused buffer holding the packed instances of every emitter
#[derive(Default)]
pub struct InstanceBuffer {
    instances: Vec<ParticleInstance>,
    /// (emitter, start, count)
    ranges: Vec<(EmitterKind, usize, usize)>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.ranges.clear();
    }

    /// Append one emitter's worth of instances
    pub fn push_range(
        &mut self,
        emitter: EmitterKind,
        instances: impl IntoIterator<Item = ParticleInstance>,
    ) {
        let start = self.instances.len();
        self.instances.extend(instances);
        let count = self.instances.len() - start;
        if count > 0 {
            self.ranges.push((emitter, start, count));
        }
    }

    /// All packed instances, ready for upload
    pub fn instance_data(&self) -> &[ParticleInstance] {
        &self.instances
    }

    /// Raw bytes of the packed instances
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Draw data for each emitter that has live particles
    pub fn draw_data(&self) -> Vec<ParticleDrawData<'_>> {
        self.ranges
            .iter()
            .map(|&(emitter, start, count)| ParticleDrawData {
                emitter,
                instances: &self.instances[start..start + count],
            })
            .collect()
    }
}
