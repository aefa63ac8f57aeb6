//! Terrain collaborator contract used by ground combat.

/// Pure height query supplied by the terrain provider.
pub trait HeightProvider {
    /// Ground height at world-space `(x, z)`.
    fn height_at(&self, x: f32, z: f32) -> f32;
}

impl<F> HeightProvider for F
where
    F: Fn(f32, f32) -> f32,
{
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}
