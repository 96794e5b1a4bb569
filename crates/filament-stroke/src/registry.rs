//! Registry of live polylines and the batch built from them.

use crate::batch::Batch;
use crate::config::StrokeConfig;
use crate::polyline::{PolylineId, PolylineInner};
use filament_core::profiling::profile_scope;
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

/// State shared between the registry and the polylines it created.
pub(crate) struct RegistryShared {
    entries: RefCell<Vec<Weak<PolylineInner>>>,
    dirty: Cell<bool>,
    next_id: Cell<u64>,
}

impl RegistryShared {
    fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            dirty: Cell::new(false),
            next_id: Cell::new(0),
        }
    }

    pub(crate) fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    pub(crate) fn next_id(&self) -> PolylineId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        PolylineId(id)
    }

    pub(crate) fn register(&self, polyline: Weak<PolylineInner>) {
        self.entries.borrow_mut().push(polyline);
        self.mark_dirty();
    }
}

/// Tracks every polyline created through it and concatenates their meshes
/// into one [`Batch`].
///
/// The registry holds weak references only. Polylines are kept alive by
/// their handles and pruned here once those are gone.
pub struct StrokeRegistry {
    shared: Rc<RegistryShared>,
    config: StrokeConfig,
    batch: Batch,
}

impl Default for StrokeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeRegistry {
    pub fn new() -> Self {
        Self::with_config(StrokeConfig::default())
    }

    /// Create a registry whose polylines tessellate with `config`.
    pub fn with_config(config: StrokeConfig) -> Self {
        Self {
            shared: Rc::new(RegistryShared::new()),
            config,
            batch: Batch::new(),
        }
    }

    pub fn config(&self) -> &StrokeConfig {
        &self.config
    }

    pub(crate) fn shared(&self) -> &Rc<RegistryShared> {
        &self.shared
    }

    /// Number of live polylines. Prunes dropped entries first.
    pub fn len(&self) -> usize {
        self.prune();
        self.shared.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        !self
            .shared
            .entries
            .borrow()
            .iter()
            .any(|entry| entry.strong_count() > 0)
    }

    /// Whether a polyline was created, updated or dropped since the last
    /// batch rebuild.
    pub fn is_dirty(&self) -> bool {
        self.shared.dirty.get()
    }

    /// Forget dropped polylines. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let mut entries = self.shared.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| entry.strong_count() > 0);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::trace!("Pruned {} expired polyline(s)", removed);
        }
        removed
    }

    /// Rebuild the batch from every live polyline.
    ///
    /// Polylines are ordered by the depth of their first vertex, farthest
    /// (largest Z) first; the sort is stable so equal depths keep creation
    /// order. The dirty flag is cleared afterwards.
    pub fn gen_batch(&mut self) -> &Batch {
        profile_scope!("stroke_gen_batch");

        self.prune();
        let mut live: Vec<Rc<PolylineInner>> = self
            .shared
            .entries
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect();

        {
            profile_scope!("sort_by_depth");
            live.sort_by(|a, b| back_to_front(a.depth(), b.depth()));
        }
        *self.shared.entries.borrow_mut() = live.iter().map(Rc::downgrade).collect();

        {
            profile_scope!("concatenate");
            self.batch.clear();
            for polyline in &live {
                self.batch.append(&polyline.mesh());
            }
        }

        self.shared.dirty.set(false);
        tracing::debug!(
            "Rebuilt stroke batch: {} polylines, {} vertices, {} triangles",
            live.len(),
            self.batch.vertices().len(),
            self.batch.triangle_count()
        );
        if let (Some(front), Some(back)) = (live.last(), live.first()) {
            tracing::trace!("Batch spans {} (back) to {} (front)", back.id(), front.id());
        }

        &self.batch
    }

    /// Rebuild the batch only if something changed since the last rebuild.
    pub fn batch_if_dirty(&mut self) -> Option<&Batch> {
        if self.is_dirty() {
            Some(self.gen_batch())
        } else {
            None
        }
    }

    /// The batch as of the last rebuild.
    pub fn batch(&self) -> &Batch {
        &self.batch
    }
}

/// Larger depth first; polylines with no geometry go last.
fn back_to_front(a: Option<f32>, b: Option<f32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
