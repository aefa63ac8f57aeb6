//! Rendering collaborator contract.
//!
//! The simulation never touches graphics objects. It asks the rendering layer
//! for an opaque handle and afterwards only shows, hides, moves or destroys it.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, VisualStyle};

/// Opaque reference to something the renderer owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u32);

/// What a visual is being requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Enemy(EnemyKind),
    PlayerProjectile,
    EnemyProjectile,
}

/// Request sent to the rendering layer when a new visual is needed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub kind: SpawnKind,
    pub position: Vec3,
    pub orientation: Vec3,
    pub style: VisualStyle,
}

/// Rendering adapter implemented by the host (3D engine, test double, ...).
pub trait VisualAdapter {
    /// Create a visual and return its handle. The visual starts visible.
    fn request_visual(&mut self, request: &SpawnRequest) -> VisualHandle;
    /// Whether the handle still refers to a live visual.
    fn is_live(&self, handle: VisualHandle) -> bool;
    fn set_visible(&mut self, handle: VisualHandle, visible: bool);
    fn set_transform(&mut self, handle: VisualHandle, position: Vec3, orientation: Vec3);
    /// Tear the visual down. Unknown handles are ignored.
    fn destroy(&mut self, handle: VisualHandle);
}

/// State of one visual held by [`HeadlessVisuals`].
#[derive(Debug, Clone, PartialEq)]
pub struct VisualRecord {
    pub request: SpawnRequest,
    pub visible: bool,
    pub position: Vec3,
    pub orientation: Vec3,
}

/// In-memory adapter for headless runs and tests.
#[derive(Debug, Default)]
pub struct HeadlessVisuals {
    records: HashMap<VisualHandle, VisualRecord>,
    next_handle: u32,
    /// Total visuals ever requested.
    pub requested: u32,
    /// Total visuals destroyed.
    pub destroyed: u32,
}

impl HeadlessVisuals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, handle: VisualHandle) -> Option<&VisualRecord> {
        self.records.get(&handle)
    }

    /// Number of live visuals currently shown.
    pub fn visible_count(&self) -> usize {
        self.records.values().filter(|r| r.visible).count()
    }

    pub fn live_count(&self) -> usize {
        self.records.len()
    }
}

impl VisualAdapter for HeadlessVisuals {
    fn request_visual(&mut self, request: &SpawnRequest) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.requested += 1;
        self.records.insert(
            handle,
            VisualRecord {
                request: *request,
                visible: true,
                position: request.position,
                orientation: request.orientation,
            },
        );
        handle
    }

    fn is_live(&self, handle: VisualHandle) -> bool {
        self.records.contains_key(&handle)
    }

    fn set_visible(&mut self, handle: VisualHandle, visible: bool) {
        if let Some(record) = self.records.get_mut(&handle) {
            record.visible = visible;
        }
    }

    fn set_transform(&mut self, handle: VisualHandle, position: Vec3, orientation: Vec3) {
        if let Some(record) = self.records.get_mut(&handle) {
            record.position = position;
            record.orientation = orientation;
        }
    }

    fn destroy(&mut self, handle: VisualHandle) {
        if self.records.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }
}
