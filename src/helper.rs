use crate::config::QrOptions;
use crate::error::Result;
use crate::generator::QrGenerator;
use crate::matrix::ModuleMatrix;

use image::RgbaImage;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/*---- Utilities ----*/

/// Renders the given matrix as text, two characters per module, with a
/// quiet zone of `border` modules.
pub fn qr_to_text(matrix: &ModuleMatrix, border: isize) -> String {
    let n = matrix.size() as isize;
    let mut out = String::new();
    for row in -border..n + border {
        for col in -border..n + border {
            let c = if matrix.get(row, col) { '█' } else { ' ' };
            out.push(c);
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Prints the given matrix to the console.
pub fn print_qr(matrix: &ModuleMatrix) {
    println!("{}", qr_to_text(matrix, 4));
}

/// Renders `options` and saves a PNG into a directory.
///
/// # Arguments
///
/// * `options` - The render options.
/// * `directory_path` - Optional. Where the image is saved. Defaults to "generated".
/// * `filename` - Optional. File name without extension. Defaults to a timestamp.
///
/// # Returns
///
/// The path of the written file.
pub fn qr_to_image_and_save(
    options: QrOptions,
    directory_path: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    let generator = QrGenerator::new(options)?;

    let directory_path = directory_path.unwrap_or("generated");
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            format!("{}", since_the_epoch.as_millis())
        }
    };

    // Check if the directory exists, create it if it doesn't
    if !Path::new(directory_path).exists() {
        fs::create_dir_all(directory_path)?;
        info!("created directory {directory_path}");
    }

    let file_path = Path::new(directory_path).join(format!("{filename}.png"));
    generator.to_file(&file_path)?;
    Ok(file_path)
}

/// Generates a styled QR code image with default styling and saves it.
///
/// # Example
///
/// ```no_run
/// use qrstyled::helper::generate_image;
///
/// generate_image("Hello, World!", Some("images"), Some("qr_code")).unwrap();
/// ```
pub fn generate_image(content: &str, directory: Option<&str>, filename: Option<&str>) -> Result<PathBuf> {
    qr_to_image_and_save(QrOptions::with_url(content), directory, filename)
}

/// Generates a styled QR code SVG with default styling.
///
/// # Example
///
/// ```
/// use qrstyled::helper::generate_svg_string;
///
/// let svg_string = generate_svg_string("Hello, World!").unwrap();
/// assert!(svg_string.contains("<svg"));
/// ```
pub fn generate_svg_string(content: &str) -> Result<String> {
    QrGenerator::new(QrOptions::with_url(content))?.to_svg()
}

/// Generates a styled QR code image buffer with default styling.
///
/// # Example
///
/// ```
/// use qrstyled::helper::generate_image_buffer;
///
/// let img_buffer = generate_image_buffer("Hello, World!").unwrap();
/// assert_eq!(img_buffer.dimensions(), (600, 600));
/// ```
pub fn generate_image_buffer(content: &str) -> Result<RgbaImage> {
    QrGenerator::new(QrOptions::with_url(content))?.generate()
}
