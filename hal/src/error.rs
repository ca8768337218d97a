use thiserror::Error;

use crate::mode::{Layer, LayerKind, VideoMode};

/// Why a runtime-checked layer accessor refused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("{layer} is not displayed in {mode}")]
    UnsupportedLayer { mode: VideoMode, layer: Layer },

    #[error("{layer} is a {found} layer in {mode}, not {expected}")]
    WrongLayerKind {
        mode: VideoMode,
        layer: Layer,
        expected: LayerKind,
        found: LayerKind,
    },

    #[error("display control holds prohibited mode code {0}")]
    UnknownMode(u8),
}
