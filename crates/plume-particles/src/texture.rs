//! Opaque texture handles handed to smoke particles

/// Handle to a texture owned by the render layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// The fixed pool of smoke textures supplied at startup
#[derive(Clone, Debug, Default)]
pub struct TexturePool {
    handles: Vec<TextureHandle>,
}

impl TexturePool {
    pub fn new(handles: Vec<TextureHandle>) -> Self {
        Self { handles }
    }

    /// A pool of `count` handles numbered from zero
    pub fn sequential(count: u32) -> Self {
        Self::new((0..count).map(TextureHandle).collect())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Round-robin pick for the `spawn_index`-th spawned particle
    pub fn pick(&self, spawn_index: u64) -> Option<TextureHandle> {
        if self.handles.is_empty() {
            return None;
        }
        let slot = (spawn_index % self.handles.len() as u64) as usize;
        Some(self.handles[slot])
    }
}
