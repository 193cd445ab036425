//! Painting hit targets and putting them back afterward.

use alloc::vec::Vec;

use crate::math::Rgba;
use crate::query::TargetId;
use crate::settings::HIGHLIGHT_COLOR;
use crate::stage::Surfaces;

/// What a target looked like before it was highlighted.
#[derive(Clone, Debug, PartialEq)]
struct Saved {
    target: TargetId,
    base_color: Option<Rgba>,
    vertex_colors: Option<Vec<Rgba>>,
}

/// Records the original colors of every target highlighted during one presentation,
/// so that they can be restored.
///
/// Each target's colors are captured the first time it is highlighted and restored
/// exactly once, no matter how many hits refer to it. Capabilities the target lacks
/// are skipped.
///
/// If several targets share a mesh, later captures see earlier targets' highlight.
/// Restoring happens in reverse order of capture, so the first capture, which holds
/// the mesh's true colors, is the one left in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightLedger {
    /// In order of first highlight.
    saved: Vec<Saved>,
}

impl HighlightLedger {
    /// Constructs an empty ledger.
    pub const fn new() -> Self {
        Self { saved: Vec::new() }
    }

    /// Paints `target` with [`HIGHLIGHT_COLOR`], first capturing its current colors if this
    /// is the first time it has been highlighted since the last [`Self::restore_all()`].
    pub fn highlight<S: Surfaces + ?Sized>(&mut self, target: TargetId, surfaces: &mut S) {
        let vertex_count = match self.saved.iter().find(|s| s.target == target) {
            Some(saved) => saved.vertex_colors.as_ref().map(Vec::len),
            None => {
                let saved = Saved {
                    target,
                    base_color: surfaces.base_color(target).map(|c| c.color()),
                    vertex_colors: surfaces.vertex_colors(target).map(|v| v.vertex_colors()),
                };
                let vertex_count = saved.vertex_colors.as_ref().map(Vec::len);
                self.saved.push(saved);
                vertex_count
            }
        };

        if let Some(color) = surfaces.base_color(target) {
            color.set_color(HIGHLIGHT_COLOR);
        }
        if let (Some(vertices), Some(count)) = (surfaces.vertex_colors(target), vertex_count) {
            vertices.set_vertex_colors(&vec![HIGHLIGHT_COLOR; count]);
        }
    }

    /// Returns whether `target` is currently highlighted.
    pub fn contains(&self, target: TargetId) -> bool {
        self.saved.iter().any(|s| s.target == target)
    }

    /// Returns the highlighted targets, in the order they were first highlighted.
    pub fn targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.saved.iter().map(|s| s.target)
    }

    /// Returns whether nothing is highlighted.
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Puts back the captured colors of every highlighted target, most recent first, and
    /// empties the ledger.
    pub fn restore_all<S: Surfaces + ?Sized>(&mut self, surfaces: &mut S) {
        for saved in self.saved.drain(..).rev() {
            if let (Some(original), Some(color)) =
                (saved.base_color, surfaces.base_color(saved.target))
            {
                color.set_color(original);
            }
            if let (Some(original), Some(vertices)) =
                (saved.vertex_colors, surfaces.vertex_colors(saved.target))
            {
                vertices.set_vertex_colors(&original);
            }
            log::trace!("restored {:?}", saved.target);
        }
    }
}
