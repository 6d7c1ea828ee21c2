use cgmath::Vector3;

/// Error positioning or rotating a cubelet.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CubeletError {
    /// Linear index is not less than `order³`.
    #[error("index {index} is out of range for an assembly of order {order}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Assembly order.
        order: u32,
    },
    /// Grid vector lies outside the assembly.
    #[error("vector {vector:?} is outside an assembly of order {order}")]
    OutOfBounds {
        /// Requested grid vector.
        vector: Vector3<f32>,
        /// Assembly order.
        order: u32,
    },
    /// Layer is deeper than the assembly.
    #[error("layer {layer} does not exist in an assembly of order {order}")]
    NoSuchLayer {
        /// Requested layer, counting from 1.
        layer: u32,
        /// Assembly order.
        order: u32,
    },
}

/// Error validating a [`crate::CubeletConfig`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Order is zero or too large.
    #[error("order must be between 1 and {max}; got {order}")]
    BadOrder {
        /// Requested order.
        order: u32,
        /// Largest supported order.
        max: u32,
    },
    /// Cell size is not a positive finite number.
    #[error("cell size must be positive; got {0}")]
    BadCellSize(f32),
    /// Sticker scale is not in `(0, 1]`.
    #[error("sticker scale must be greater than 0 and at most 1; got {0}")]
    BadStickerScale(f32),
}

/// Error parsing twist notation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Empty move.
    #[error("empty move")]
    Empty,
    /// Unrecognized face or rotation letter.
    #[error("unknown face {0:?}")]
    UnknownFace(char),
    /// Layer prefix is zero or not a number.
    #[error("bad layer prefix in {0:?}")]
    BadLayer(String),
    /// Layer prefix on a whole-cube rotation.
    #[error("whole-cube rotation {0:?} cannot have a layer prefix")]
    LayerOnRotation(String),
    /// Unrecognized suffix after the face letter.
    #[error("unknown suffix {suffix:?} in {token:?}")]
    BadSuffix {
        /// Full move.
        token: String,
        /// Trailing text after the face letter.
        suffix: String,
    },
}
