pub mod gauges;
pub mod goal;
pub mod overlay;
pub mod scene;
pub mod settings;
pub mod task;
pub mod telemetry;
