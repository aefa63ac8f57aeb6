//! Fixed-capacity projectile pool.
//!
//! Slots are reused instead of allocating a projectile per shot. When every
//! slot is busy the oldest projectile is retired to make room, so `acquire`
//! never fails once the pool exists. Visual handles are borrowed from the
//! rendering layer lazily and kept with the slot across reuses.

use glam::Vec3;

use starfall_core::enums::{ProjectileOrigin, VisualStyle};
use starfall_core::error::ConfigurationError;
use starfall_core::render::{SpawnKind, SpawnRequest, VisualAdapter, VisualHandle};

/// Index of a pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

/// Everything needed to launch a projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub origin: ProjectileOrigin,
    pub position: Vec3,
    /// Unit travel direction.
    pub direction: Vec3,
    pub speed: f32,
    pub power: f32,
    /// Distance after which the projectile expires.
    pub range: f32,
    pub style: VisualStyle,
}

/// An in-flight projectile. Lives inside a slot, never on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub origin: ProjectileOrigin,
    pub position: Vec3,
    /// Position before the last advance; the hit test sweeps from here.
    pub previous_position: Vec3,
    pub direction: Vec3,
    pub speed: f32,
    pub power: f32,
    pub range: f32,
    pub distance_traveled: f32,
    /// Session time at spawn (seconds).
    pub start_time: f64,
    /// Monotonic spawn counter; breaks `start_time` ties.
    pub spawn_seq: u64,
    pub style: VisualStyle,
}

impl Projectile {
    fn from_spec(spec: &ProjectileSpec, start_time: f64, spawn_seq: u64) -> Self {
        Self {
            origin: spec.origin,
            position: spec.position,
            previous_position: spec.position,
            direction: spec.direction,
            speed: spec.speed,
            power: spec.power,
            range: spec.range,
            distance_traveled: 0.0,
            start_time,
            spawn_seq,
            style: spec.style,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.distance_traveled > self.range
    }
}

#[derive(Debug, Default)]
struct Slot {
    projectile: Option<Projectile>,
    /// Visual owned by the rendering layer, with the style it was made for.
    visual: Option<(VisualHandle, VisualStyle)>,
}

/// Result of [`ProjectilePool::acquire`].
#[derive(Debug)]
pub struct Acquired {
    pub slot: SlotId,
    /// The projectile that was retired to free the slot, if the pool was full.
    pub recycled: Option<Projectile>,
}

/// Fixed-capacity arena of projectile slots.
#[derive(Debug)]
pub struct ProjectilePool {
    slots: Vec<Slot>,
    /// Free slot indices; popped from the back.
    free: Vec<usize>,
    next_seq: u64,
}

impl ProjectilePool {
    /// Create a pool with `capacity` slots. Zero capacity is a setup error.
    pub fn new(capacity: usize) -> Result<Self, ConfigurationError> {
        if capacity == 0 {
            return Err(ConfigurationError::ZeroPoolCapacity);
        }
        Ok(Self {
            slots: (0..capacity).map(|_| Slot::default()).collect(),
            free: (0..capacity).rev().collect(),
            next_seq: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn in_use(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    pub fn get(&self, slot: SlotId) -> Option<&Projectile> {
        self.slots.get(slot.0).and_then(|s| s.projectile.as_ref())
    }

    pub fn visual(&self, slot: SlotId) -> Option<VisualHandle> {
        self.slots
            .get(slot.0)
            .and_then(|s| s.visual.map(|(handle, _)| handle))
    }

    /// Active projectiles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Projectile)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.projectile.as_ref().map(|p| (SlotId(i), p)))
    }

    /// The active projectile with the smallest `(start_time, spawn_seq)`.
    pub fn oldest_active(&self) -> Option<SlotId> {
        self.iter()
            .min_by(|(_, a), (_, b)| {
                a.start_time
                    .total_cmp(&b.start_time)
                    .then(a.spawn_seq.cmp(&b.spawn_seq))
            })
            .map(|(slot, _)| slot)
    }

    /// Place a projectile into a free slot, retiring the oldest one if full.
    pub fn acquire(
        &mut self,
        spec: &ProjectileSpec,
        start_time: f64,
        visuals: &mut dyn VisualAdapter,
    ) -> Acquired {
        let mut recycled = None;
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                // Capacity is at least 1, so a full pool has an oldest slot.
                let index = self.oldest_active().map(|s| s.0).unwrap_or(0);
                let slot = &mut self.slots[index];
                recycled = slot.projectile.take();
                if let Some((handle, _)) = slot.visual {
                    visuals.set_visible(handle, false);
                }
                index
            }
        };

        let seq = self.next_seq;
        self.next_seq += 1;
        let projectile = Projectile::from_spec(spec, start_time, seq);
        let slot = &mut self.slots[index];
        slot.visual = Some(attach_visual(slot.visual.take(), &projectile, visuals));
        slot.projectile = Some(projectile);

        Acquired {
            slot: SlotId(index),
            recycled,
        }
    }

    /// Free a slot and hide its visual. Releasing a free slot does nothing.
    pub fn release(&mut self, slot: SlotId, visuals: &mut dyn VisualAdapter) -> Option<Projectile> {
        let entry = self.slots.get_mut(slot.0)?;
        let projectile = entry.projectile.take()?;
        if let Some((handle, _)) = entry.visual {
            visuals.set_visible(handle, false);
        }
        self.free.push(slot.0);
        Some(projectile)
    }

    /// Free every slot and hand all visuals back to the rendering layer.
    pub fn release_all(&mut self, visuals: &mut dyn VisualAdapter) {
        for slot in &mut self.slots {
            slot.projectile = None;
            if let Some((handle, _)) = slot.visual.take() {
                visuals.destroy(handle);
            }
        }
        self.free = (0..self.slots.len()).rev().collect();
    }

    /// Integrate every active projectile by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for projectile in self.slots.iter_mut().filter_map(|s| s.projectile.as_mut()) {
            let step = projectile.speed * dt;
            projectile.previous_position = projectile.position;
            projectile.position += projectile.direction * step;
            projectile.distance_traveled += step;
        }
    }

    /// Push active projectile transforms to their visuals.
    pub fn sync_visuals(&self, visuals: &mut dyn VisualAdapter) {
        for slot in &self.slots {
            if let (Some(p), Some((handle, _))) = (&slot.projectile, slot.visual) {
                visuals.set_transform(handle, p.position, p.direction);
            }
        }
    }
}

/// Reuse the slot's visual if it is still live and styled the same,
/// otherwise request a fresh one.
fn attach_visual(
    existing: Option<(VisualHandle, VisualStyle)>,
    projectile: &Projectile,
    visuals: &mut dyn VisualAdapter,
) -> (VisualHandle, VisualStyle) {
    if let Some((handle, style)) = existing {
        if style == projectile.style && visuals.is_live(handle) {
            visuals.set_transform(handle, projectile.position, projectile.direction);
            visuals.set_visible(handle, true);
            return (handle, style);
        }
        visuals.destroy(handle);
    }
    let kind = match projectile.origin {
        ProjectileOrigin::Player => SpawnKind::PlayerProjectile,
        ProjectileOrigin::Enemy => SpawnKind::EnemyProjectile,
    };
    let handle = visuals.request_visual(&SpawnRequest {
        kind,
        position: projectile.position,
        orientation: projectile.direction,
        style: projectile.style,
    });
    (handle, projectile.style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_core::render::HeadlessVisuals;

    fn spec() -> ProjectileSpec {
        ProjectileSpec {
            origin: ProjectileOrigin::Player,
            position: Vec3::ZERO,
            direction: Vec3::X,
            speed: 10.0,
            power: 5.0,
            range: 10.0,
            style: VisualStyle::PlayerBolt,
        }
    }

    #[test]
    fn test_zero_capacity_is_fatal() {
        assert!(matches!(
            ProjectilePool::new(0),
            Err(ConfigurationError::ZeroPoolCapacity)
        ));
    }

    #[test]
    fn test_acquire_until_full() {
        let mut visuals = HeadlessVisuals::new();
        let mut pool = ProjectilePool::new(3).unwrap();
        for i in 0..3 {
            let acquired = pool.acquire(&spec(), i as f64, &mut visuals);
            assert!(acquired.recycled.is_none());
        }
        assert!(pool.is_full());
        assert_eq!(pool.in_use(), 3);
        assert_eq!(visuals.requested, 3);
    }

    #[test]
    fn test_full_pool_recycles_oldest() {
        let mut visuals = HeadlessVisuals::new();
        let mut pool = ProjectilePool::new(2).unwrap();
        let a = pool.acquire(&spec(), 0.0, &mut visuals).slot;
        let b = pool.acquire(&spec(), 0.5, &mut visuals).slot;

        let c = pool.acquire(&spec(), 1.0, &mut visuals);
        assert_eq!(c.slot, a, "oldest projectile's slot is reused");
        assert_eq!(c.recycled.map(|p| p.start_time), Some(0.0));
        assert_eq!(pool.in_use(), 2);

        let d = pool.acquire(&spec(), 1.5, &mut visuals);
        assert_eq!(d.slot, b);
        // Handles are reused, never re-requested.
        assert_eq!(visuals.requested, 2);
    }

    #[test]
    fn test_equal_start_times_break_by_spawn_order() {
        let mut visuals = HeadlessVisuals::new();
        let mut pool = ProjectilePool::new(3).unwrap();
        let first = pool.acquire(&spec(), 2.0, &mut visuals).slot;
        pool.acquire(&spec(), 2.0, &mut visuals);
        pool.acquire(&spec(), 2.0, &mut visuals);
        assert_eq!(pool.oldest_active(), Some(first));
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut visuals = HeadlessVisuals::new();
        let mut pool = ProjectilePool::new(2).unwrap();
        let slot = pool.acquire(&spec(), 0.0, &mut visuals).slot;
        let handle = pool.visual(slot).unwrap();

        assert!(pool.release(slot, &mut visuals).is_some());
        assert_eq!(pool.in_use(), 0);
        assert!(!visuals.record(handle).unwrap().visible);

        assert!(pool.release(slot, &mut visuals).is_none());
        assert!(pool.release(SlotId(99), &mut visuals).is_none());
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn test_released_slot_reuses_visual() {
        let mut visuals = HeadlessVisuals::new();
        let mut pool = ProjectilePool::new(1).unwrap();
        let slot = pool.acquire(&spec(), 0.0, &mut visuals).slot;
        pool.release(slot, &mut visuals);
        let again = pool.acquire(&spec(), 1.0, &mut visuals).slot;
        assert_eq!(again, slot);
        assert_eq!(visuals.requested, 1);
        assert!(visuals.record(pool.visual(slot).unwrap()).unwrap().visible);
    }

    #[test]
    fn test_style_change_replaces_visual() {
        let mut visuals = HeadlessVisuals::new();
        let mut pool = ProjectilePool::new(1).unwrap();
        let slot = pool.acquire(&spec(), 0.0, &mut visuals).slot;
        let old = pool.visual(slot).unwrap();
        pool.release(slot, &mut visuals);

        let orb = ProjectileSpec {
            style: VisualStyle::HeavyOrb,
            ..spec()
        };
        pool.acquire(&orb, 1.0, &mut visuals);
        assert!(!visuals.is_live(old));
        assert_eq!(visuals.requested, 2);
        assert_eq!(visuals.destroyed, 1);
    }

    #[test]
    fn test_torn_down_visual_is_replaced() {
        let mut visuals = HeadlessVisuals::new();
        let mut pool = ProjectilePool::new(1).unwrap();
        let slot = pool.acquire(&spec(), 0.0, &mut visuals).slot;
        let old = pool.visual(slot).unwrap();
        pool.release(slot, &mut visuals);
        visuals.destroy(old);

        pool.acquire(&spec(), 1.0, &mut visuals);
        let new = pool.visual(slot).unwrap();
        assert_ne!(new, old);
        assert!(visuals.is_live(new));
    }

    #[test]
    fn test_advance_and_expiry() {
        let mut visuals = HeadlessVisuals::new();
        let mut pool = ProjectilePool::new(1).unwrap();
        let slot = pool.acquire(&spec(), 0.0, &mut visuals).slot;

        pool.advance(0.5);
        let p = pool.get(slot).unwrap();
        assert_eq!(p.position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(p.previous_position, Vec3::ZERO);
        assert!(!p.is_expired());

        // 10 u/s * 1.1 s = 11 > range 10.
        pool.advance(1.1);
        assert!(pool.get(slot).unwrap().is_expired());
    }

    #[test]
    fn test_release_all_destroys_visuals() {
        let mut visuals = HeadlessVisuals::new();
        let mut pool = ProjectilePool::new(4).unwrap();
        for i in 0..3 {
            pool.acquire(&spec(), i as f64, &mut visuals);
        }
        pool.release_all(&mut visuals);
        assert_eq!(pool.in_use(), 0);
        assert_eq!(visuals.live_count(), 0);
        assert_eq!(pool.iter().count(), 0);
        // Pool is usable again.
        assert_eq!(pool.acquire(&spec(), 0.0, &mut visuals).slot, SlotId(0));
    }

    #[test]
    fn test_in_use_matches_active_projectiles() {
        let mut visuals = HeadlessVisuals::new();
        let mut pool = ProjectilePool::new(3).unwrap();
        for i in 0..7 {
            let acquired = pool.acquire(&spec(), i as f64, &mut visuals);
            if i % 3 == 0 {
                pool.release(acquired.slot, &mut visuals);
            }
            assert_eq!(pool.in_use(), pool.iter().count());
            assert!(pool.in_use() <= pool.capacity());
        }
    }
}
