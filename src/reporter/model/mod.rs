pub mod method;
pub mod record;
pub mod status;
pub mod telemetry;
