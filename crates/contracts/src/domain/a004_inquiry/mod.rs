pub mod aggregate;
pub mod status_pipeline;
