use thiserror::Error;

/// Rejected scene configuration. Raised once at construction; runtime paths never fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("camera timeline needs at least 2 keyframes, got {0}")]
    TooFewKeyframes(usize),
    #[error("keyframe {index} ({label}) threshold {threshold} is below the previous one")]
    DecreasingThreshold {
        index: usize,
        label: &'static str,
        threshold: f32,
    },
    #[error("camera timeline must span 0.0..=1.0, got {first}..={last}")]
    TimelineBounds { first: f32, last: f32 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("streamline pool must hold at least one particle")]
    EmptyParticlePool,
}

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to parse OBJ: {0}")]
    Parse(#[from] tobj::LoadError),
    #[error("mesh has no triangles")]
    Empty,
    #[error("triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}
