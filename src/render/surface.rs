use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::render::Renderer;

/// Stable identifier the host uses for one drawing surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(String);

impl SurfaceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SurfaceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Host-owned drawing surfaces looked up by id.
///
/// The core never creates or destroys surfaces. A lookup that returns `None`
/// means the surface is currently unavailable and drawing is skipped.
pub trait SurfaceProvider {
    fn surface_size(&self, id: &SurfaceId) -> Option<Viewport>;
    fn renderer_mut(&mut self, id: &SurfaceId) -> Option<&mut dyn Renderer>;
}

/// Simple [`SurfaceProvider`] backed by an insertion-ordered table.
#[derive(Debug)]
pub struct SurfaceTable<R: Renderer> {
    surfaces: IndexMap<SurfaceId, (Viewport, R)>,
}

impl<R: Renderer> Default for SurfaceTable<R> {
    fn default() -> Self {
        Self {
            surfaces: IndexMap::new(),
        }
    }
}

impl<R: Renderer> SurfaceTable<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_surface(mut self, id: impl Into<SurfaceId>, viewport: Viewport, renderer: R) -> Self {
        self.insert(id, viewport, renderer);
        self
    }

    pub fn insert(&mut self, id: impl Into<SurfaceId>, viewport: Viewport, renderer: R) {
        self.surfaces.insert(id.into(), (viewport, renderer));
    }

    pub fn remove(&mut self, id: &SurfaceId) -> Option<R> {
        self.surfaces.shift_remove(id).map(|(_, renderer)| renderer)
    }

    pub fn resize(&mut self, id: &SurfaceId, viewport: Viewport) -> bool {
        match self.surfaces.get_mut(id) {
            Some(entry) => {
                entry.0 = viewport;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn renderer(&self, id: &SurfaceId) -> Option<&R> {
        self.surfaces.get(id).map(|(_, renderer)| renderer)
    }
}

impl From<String> for SurfaceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<R: Renderer> SurfaceProvider for SurfaceTable<R> {
    fn surface_size(&self, id: &SurfaceId) -> Option<Viewport> {
        self.surfaces.get(id).map(|(viewport, _)| *viewport)
    }

    fn renderer_mut(&mut self, id: &SurfaceId) -> Option<&mut dyn Renderer> {
        self.surfaces
            .get_mut(id)
            .map(|(_, renderer)| renderer as &mut dyn Renderer)
    }
}
