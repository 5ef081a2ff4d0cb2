//! Error types for hook-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid block markers ({start:?}, {end:?}): {reason}")]
    InvalidMarkers {
        start: String,
        end: String,
        reason: &'static str,
    },

    #[error("Block body contains the marker line {marker:?}")]
    BodyContainsMarker { marker: String },
}
