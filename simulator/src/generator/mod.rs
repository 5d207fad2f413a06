pub mod profile;

pub use profile::{build_session_payload, build_session_payload_from_config, GeneratorConfig};
