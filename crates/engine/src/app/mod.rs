mod loop_runner;
mod metrics;
mod scene;
mod viewport;

pub use loop_runner::{run_headless, AppError, LoopConfig, RunSummary};
pub use metrics::LoopMetricsSnapshot;
pub use scene::{
    Camera2D, CollisionLayer, Entity, EntityId, EntityIdAllocator, LayerMask, Scene, SceneCommand,
    SceneWorld, SpawnDesc, Transform, Vec2,
};
pub use viewport::{OrthographicViewport, ViewportProjection};
