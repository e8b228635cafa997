/// Brush stamp collection
pub mod brush;
/// Stamp preparation and alpha compositing
pub mod compositor;
/// Multi-stage run orchestration
pub mod executor;
/// Stroke genome with greedy per-stroke mutation
pub mod genome;
/// Read-only run observers
pub mod observer;
/// Brush size and sampling-mask schedules
pub mod schedule;
/// Stroke records, sampling and mutation targets
pub mod stroke;
