//! Shared building blocks for the fleet tracker workspace.
//!
//! Kept deliberately free of web-framework and database dependencies so that
//! every crate (including migrations and the binary) can pull it in.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn log_format_parses_known_values() {
        use utils::logging::LogFormat;
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("anything-else"), LogFormat::Compact);
    }
}
