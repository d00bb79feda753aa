//! The module grid consumed by the renderer.
//!
//! Encoding itself (segments, Reed-Solomon, masking) is delegated to the
//! `qrcode` crate; this module only adapts its output into an immutable
//! row/column grid.

use qrcode::{Color, EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The smallest side length of a QR symbol (version 1).
pub const MIN_SIZE: usize = 21;

/// The error correction level used when encoding the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorCorrectionLevel {
    /// Recovers roughly 7% of damaged codewords.
    L,
    /// Recovers roughly 15%.
    M,
    /// Recovers roughly 25%.
    Q,
    /// Recovers roughly 30%. Needed when a logo covers the center.
    #[default]
    H,
}

impl ErrorCorrectionLevel {
    fn ec_level(self) -> EcLevel {
        match self {
            ErrorCorrectionLevel::L => EcLevel::L,
            ErrorCorrectionLevel::M => EcLevel::M,
            ErrorCorrectionLevel::Q => EcLevel::Q,
            ErrorCorrectionLevel::H => EcLevel::H,
        }
    }
}

impl std::str::FromStr for ErrorCorrectionLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "L" => Ok(ErrorCorrectionLevel::L),
            "M" => Ok(ErrorCorrectionLevel::M),
            "Q" => Ok(ErrorCorrectionLevel::Q),
            "H" => Ok(ErrorCorrectionLevel::H),
            other => Err(Error::config(format!(
                "Error correction level must be one of: L, M, Q, H (got '{other}')"
            ))),
        }
    }
}

/// A square grid of dark (`true`) and light (`false`) modules.
///
/// Immutable once built. Coordinates are `(row, col)`, 0-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Builds a matrix from row-major module data.
    ///
    /// Fails when `modules` does not hold exactly `size * size` entries, or
    /// `size` is even or smaller than a version 1 symbol.
    pub fn new(size: usize, modules: Vec<bool>) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(Error::InvalidMatrix(format!(
                "side length {size} is below the QR minimum of {MIN_SIZE}"
            )));
        }
        if size % 2 == 0 {
            return Err(Error::InvalidMatrix(format!(
                "side length {size} is even; QR symbols have an odd side length"
            )));
        }
        if modules.len() != size * size {
            return Err(Error::InvalidMatrix(format!(
                "expected {} modules for side length {size}, got {}",
                size * size,
                modules.len()
            )));
        }
        Ok(ModuleMatrix { size, modules })
    }

    /// Builds a matrix by asking `f(row, col)` for every module.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Result<Self> {
        let mut modules = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                modules.push(f(row, col));
            }
        }
        Self::new(size, modules)
    }

    /// Side length in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether the module at `(row, col)` is dark.
    /// Anything outside the grid reads as light.
    pub fn get(&self, row: isize, col: isize) -> bool {
        let n = self.size as isize;
        if row < 0 || col < 0 || row >= n || col >= n {
            return false;
        }
        self.modules[row as usize * self.size + col as usize]
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

/// Encodes `content` into a module matrix at the given error correction level.
pub fn encode(content: &str, level: ErrorCorrectionLevel) -> Result<ModuleMatrix> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), level.ec_level())
        .map_err(|e| Error::Encode(e.to_string()))?;
    let size = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();
    ModuleMatrix::new(size, modules)
}
