pub mod app;

pub use app::{
    run_headless, AppError, Camera2D, CollisionLayer, Entity, EntityId, EntityIdAllocator,
    LayerMask, LoopConfig, LoopMetricsSnapshot, OrthographicViewport, RunSummary, Scene,
    SceneCommand, SceneWorld, SpawnDesc, Transform, Vec2, ViewportProjection,
};
