//! Scene host abstraction and a slotmap-backed sprite arena
//!
//! Widgets never hold visuals directly. They hold [`VisualId`] handles and
//! ask a [`SceneHost`] to load, attach, detach and show them. A real
//! renderer implements the trait over its own node tree; [`SpriteArena`]
//! is the in-process implementation used by tests and headless replay.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::error::{Result, SceneError};
use crate::geometry::Size;

new_key_type! {
    /// Stable handle to a visual owned by a scene host
    pub struct VisualId;
}

/// Operations a widget needs from the host scene graph
pub trait SceneHost {
    /// Load an image asset into a new, detached and hidden visual
    fn load(&mut self, asset: &str) -> Result<VisualId>;

    /// Attach a visual to the scene (idempotent)
    fn attach(&mut self, visual: VisualId);

    /// Detach and release a visual
    ///
    /// Unknown or already released handles are ignored.
    fn detach(&mut self, visual: VisualId);

    /// Show or hide a visual
    fn set_visible(&mut self, visual: VisualId, visible: bool);

    /// Content size of a visual, `None` if the handle is stale
    fn size_of(&self, visual: VisualId) -> Option<Size>;

    /// Whether the visual is currently attached
    fn is_attached(&self, visual: VisualId) -> bool;

    /// Whether the visual is currently visible
    fn is_visible(&self, visual: VisualId) -> bool;
}

#[derive(Clone, Debug)]
struct Sprite {
    /// Asset path, kept for diagnostics
    asset: String,
    size: Size,
    visible: bool,
    attached: bool,
}

/// In-process [`SceneHost`] backed by a slotmap
///
/// Assets are "decoded" by looking them up in a catalog of known image
/// sizes, so loading is deterministic and needs no image files.
#[derive(Default)]
pub struct SpriteArena {
    sprites: SlotMap<VisualId, Sprite>,
    catalog: FxHashMap<String, Size>,
}

impl SpriteArena {
    /// Create an empty arena with an empty asset catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image asset and its pixel size
    pub fn register_asset(&mut self, path: impl Into<String>, size: Size) {
        self.catalog.insert(path.into(), size);
    }

    /// Builder-style variant of [`register_asset`](Self::register_asset)
    pub fn with_asset(mut self, path: impl Into<String>, size: Size) -> Self {
        self.register_asset(path, size);
        self
    }

    /// Number of live sprites
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// True if no sprites are live
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl SceneHost for SpriteArena {
    fn load(&mut self, asset: &str) -> Result<VisualId> {
        let size = *self
            .catalog
            .get(asset)
            .ok_or_else(|| SceneError::AssetNotFound(asset.to_string()))?;

        let id = self.sprites.insert(Sprite {
            asset: asset.to_string(),
            size,
            visible: false,
            attached: false,
        });
        tracing::trace!(?id, asset, "sprite loaded");
        Ok(id)
    }

    fn attach(&mut self, visual: VisualId) {
        if let Some(sprite) = self.sprites.get_mut(visual) {
            sprite.attached = true;
        }
    }

    fn detach(&mut self, visual: VisualId) {
        if let Some(sprite) = self.sprites.remove(visual) {
            tracing::trace!(?visual, asset = %sprite.asset, "sprite released");
        }
    }

    fn set_visible(&mut self, visual: VisualId, visible: bool) {
        if let Some(sprite) = self.sprites.get_mut(visual) {
            sprite.visible = visible;
        }
    }

    fn size_of(&self, visual: VisualId) -> Option<Size> {
        self.sprites.get(visual).map(|s| s.size)
    }

    fn is_attached(&self, visual: VisualId) -> bool {
        self.sprites.get(visual).is_some_and(|s| s.attached)
    }

    fn is_visible(&self, visual: VisualId) -> bool {
        self.sprites.get(visual).is_some_and(|s| s.visible)
    }
}
