//! # qrstyled
//!
//! Stylized QR code rendering on top of an encoded module matrix.
//!
//! `qrstyled` draws QR symbols as smooth blobs instead of a grid of squares:
//! each dark module rounds only the corners that face empty space, so runs
//! of modules merge into one contiguous shape. On top of that it supports
//! gradients, custom finder pattern ("eye") colors, radii and circular eyes,
//! a rounded background card, and a centered logo with a drop shadow.
//!
//! ## Features
//!
//! - Neighbor-aware corner rounding with seam-free edges between modules.
//! - Solid or multi-stop linear gradient fills at any angle.
//! - Eye color/radius overrides and circular eyes.
//! - Logo overlay with circle or rounded square backdrop.
//! - PNG, JPEG, data URL and SVG output from the same render pipeline.
//! - vCard, WiFi, e-mail, SMS and geo payloads.
//!
//! ## Example
//!
//! ```rust
//! use qrstyled::{EyeShape, QrGenerator, QrOptions};
//!
//! let generator = QrGenerator::new(QrOptions {
//!     size: Some(400),
//!     gradient: Some(true),
//!     eye_shape: Some(EyeShape::Circle),
//!     ..QrOptions::with_url("https://example.com")
//! })
//! .unwrap();
//! let image = generator.generate().unwrap();
//! assert_eq!(image.dimensions(), (400, 400));
//! ```
//!
//! ## Modules
//!
//! - [`matrix`], [`adjacency`], [`region`], [`module_path`], [`eye`]: the geometric core.
//! - [`surface`], [`raster`], [`svg`], [`compositor`]: drawing.
//! - [`config`], [`payload`], [`generator`], [`helper`]: configuration and entry points.

#![forbid(unsafe_code)]

pub mod adjacency;
pub mod compositor;
pub mod config;
pub mod error;
pub mod eye;
pub mod generator;
pub mod geometry;
pub mod helper;
pub mod logo;
pub mod matrix;
pub mod module_path;
pub mod paint;
pub mod payload;
pub mod raster;
pub mod region;
pub mod surface;
pub mod svg;

pub use config::{EyeShape, LogoShape, QrOptions, RenderConfig};
pub use error::{Error, Result};
pub use generator::{QrGenerator, RasterFormat};
pub use matrix::{encode, ErrorCorrectionLevel, ModuleMatrix};
pub use payload::DataType;
