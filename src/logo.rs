//! Logo loading and placement.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::RgbaImage;
use log::debug;

use crate::config::{LogoConfig, LogoShape};
use crate::error::{Error, Result};
use crate::geometry::{Rect, Shape};
use crate::surface::Shadow;

/// The shadow cast by the logo image.
pub const LOGO_SHADOW: Shadow = Shadow {
    offset_x: 0.0,
    offset_y: 2.0,
    blur: 12.0,
    opacity: 0.15,
};

/// How long a remote logo may take to arrive.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Downloads `url`, failing on transport errors and non-success statuses.
fn fetch(url: &str) -> reqwest::Result<Vec<u8>> {
    let response = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?
        .get(url)
        .send()?
        .error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

/// Decodes the logo at `source`: a file path, an `http(s)` URL or a base64
/// `data:` URL.
pub fn load_logo(source: &str) -> Result<RgbaImage> {
    let failed = |reason: String| Error::LogoLoad {
        location: source.to_string(),
        reason,
    };

    let image = if let Some(rest) = source.strip_prefix("data:") {
        let (_, encoded) = rest
            .split_once(";base64,")
            .ok_or_else(|| failed("only base64 data URLs are supported".to_string()))?;
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| failed(e.to_string()))?;
        image::load_from_memory(&bytes).map_err(|e| failed(e.to_string()))?
    } else if source.starts_with("http://") || source.starts_with("https://") {
        debug!("fetching logo from {source}");
        let bytes = fetch(source).map_err(|e| failed(e.to_string()))?;
        image::load_from_memory(&bytes).map_err(|e| failed(e.to_string()))?
    } else {
        image::open(source).map_err(|e| failed(e.to_string()))?
    };

    debug!("loaded logo {}x{}", image.width(), image.height());
    Ok(image.to_rgba8())
}

/// Where the logo and its backdrop go on a canvas of side `canvas`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoPlacement {
    /// Backdrop shape, filled with the logo background color.
    pub backdrop: Shape,
    /// Destination of the logo image.
    pub image: Rect,
}

/// Centers the logo on the canvas; the backdrop is the logo side plus padding.
pub fn place_logo(logo: &LogoConfig, canvas: f64) -> LogoPlacement {
    let side = logo.side();
    let backdrop_side = side + logo.padding;
    let center = canvas / 2.0;
    let backdrop = match logo.shape {
        LogoShape::Circle => Shape::Circle {
            cx: center,
            cy: center,
            r: backdrop_side / 2.0,
        },
        LogoShape::Square => Shape::Rect {
            rect: Rect::centered(center, center, backdrop_side),
            radius: logo.radius,
        },
    };
    LogoPlacement {
        backdrop,
        image: Rect::centered(center, center, side),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::HexColor;
    use std::io::{Cursor, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]));
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png).unwrap();
        png.into_inner()
    }

    /// Answers one HTTP request on a local port with `status` and `body`.
    fn serve_once(status: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request);
            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(&body).unwrap();
        });
        format!("http://{addr}/logo.png")
    }

    fn logo(shape: LogoShape, size: u32) -> LogoConfig {
        LogoConfig {
            source: "unused".into(),
            size,
            shape,
            padding: 10.0,
            radius: 20.0,
            background: HexColor::parse("#ffffff").unwrap(),
        }
    }

    #[test]
    fn test_circle_placement() {
        let placement = place_logo(&logo(LogoShape::Circle, 120), 600.0);
        assert_eq!(placement.backdrop, Shape::Circle { cx: 300.0, cy: 300.0, r: 65.0 });
        assert_eq!(placement.image, Rect::new(240.0, 240.0, 120.0, 120.0));
    }

    #[test]
    fn test_square_placement_keeps_logo_size() {
        let placement = place_logo(&logo(LogoShape::Square, 120), 400.0);
        assert_eq!(
            placement.backdrop,
            Shape::Rect { rect: Rect::new(135.0, 135.0, 130.0, 130.0), radius: 20.0 }
        );
        assert_eq!(placement.image.width, 120.0);
    }

    #[test]
    fn test_load_from_data_url() {
        let url = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(3, 2)));
        let loaded = load_logo(&url).unwrap();
        assert_eq!(loaded.dimensions(), (3, 2));
    }

    #[test]
    fn test_missing_file_is_logo_error() {
        let err = load_logo("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, Error::LogoLoad { .. }));
    }

    #[test]
    fn test_load_from_http() {
        let url = serve_once("200 OK", png_bytes(4, 5));
        assert_eq!(load_logo(&url).unwrap().dimensions(), (4, 5));
    }

    #[test]
    fn test_http_error_status_is_logo_error() {
        let url = serve_once("404 Not Found", Vec::new());
        assert!(matches!(load_logo(&url), Err(Error::LogoLoad { .. })));
    }

    #[test]
    fn test_unreachable_url_is_logo_error() {
        // Bind then drop a listener so the port is known to be closed.
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let err = load_logo(&format!("http://{addr}/logo.png")).unwrap_err();
        match err {
            Error::LogoLoad { location, .. } => assert!(location.starts_with("http://127.0.0.1:")),
            other => panic!("expected logo error, got {other:?}"),
        }
    }
}
