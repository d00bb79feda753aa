use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::json;

use qrstyled::{DataType, Error, EyeShape, LogoShape, QrGenerator, QrOptions, RasterFormat};

fn options(url: &str) -> QrOptions {
    QrOptions {
        size: Some(300),
        ..QrOptions::with_url(url)
    }
}

fn logo_data_url() -> String {
    let logo = RgbaImage::from_pixel(16, 16, Rgba([200, 30, 30, 255]));
    let mut png = Cursor::new(Vec::new());
    logo.write_to(&mut png, ImageFormat::Png).unwrap();
    format!("data:image/png;base64,{}", STANDARD.encode(png.into_inner()))
}

#[test]
fn svg_carries_colors_and_namespace() {
    let generator = QrGenerator::new(QrOptions {
        foreground_color: Some("#FF0000".into()),
        background_color: Some("#FFFFFF".into()),
        ..options("https://test.com")
    })
    .unwrap();
    let svg = generator.to_svg().unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains("width=\"300\""));
    assert!(svg.contains("viewBox=\"0 0 300 300\""));
    assert!(svg.contains("#FF0000"));
    assert!(svg.contains("#FFFFFF"));
}

#[test]
fn svg_circular_eyes_and_gradient() {
    let generator = QrGenerator::new(QrOptions {
        eye_shape: Some(EyeShape::Circle),
        eye_color: Some("#1e40af".into()),
        gradient: Some(true),
        ..options("https://example.com")
    })
    .unwrap();
    let svg = generator.to_svg().unwrap();
    assert_eq!(svg.matches("<circle").count(), 9);
    assert!(svg.contains("<linearGradient"));
    assert_eq!(svg.matches("<stop ").count(), 5);
}

#[test]
fn rendering_is_idempotent() {
    let generator = QrGenerator::new(QrOptions {
        gradient: Some(true),
        logo: Some(logo_data_url()),
        logo_shape: Some(LogoShape::Square),
        ..options("same input, same output")
    })
    .unwrap();
    assert_eq!(generator.generate().unwrap(), generator.generate().unwrap());
    assert_eq!(generator.to_svg().unwrap(), generator.to_svg().unwrap());
}

#[test]
fn raster_layers_background_modules_and_logo() {
    let generator = QrGenerator::new(QrOptions {
        foreground_color: Some("#000000".into()),
        logo: Some(logo_data_url()),
        logo_size: Some(60),
        ..options("https://example.com")
    })
    .unwrap();
    let img = generator.generate().unwrap();
    assert_eq!(img.dimensions(), (300, 300));
    // Rounded card leaves the very corner transparent.
    assert_eq!(img.get_pixel(0, 0)[3], 0);
    // Padding area is background.
    assert_eq!(*img.get_pixel(150, 5), Rgba([255, 255, 255, 255]));
    // Logo sits in the middle.
    let center = img.get_pixel(150, 150);
    assert!(center[0].abs_diff(200) <= 2 && center[1].abs_diff(30) <= 2);
    assert_eq!(center[3], 255);
    // Some module pixels are dark.
    assert!(img.pixels().any(|p| p[0] < 20 && p[3] == 255));
}

#[test]
fn buffers_and_data_urls() {
    let generator = QrGenerator::new(options("buffers")).unwrap();
    let png = generator.to_buffer(RasterFormat::Png).unwrap();
    assert_eq!(&png[1..4], b"PNG");
    let jpeg = generator.to_buffer(RasterFormat::Jpeg).unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    let url = generator.to_data_url(RasterFormat::Png).unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
}

#[test]
fn files_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let generator = QrGenerator::new(options("files")).unwrap();

    let png = dir.path().join("qr.png");
    generator.to_file(&png).unwrap();
    assert_eq!(image::open(&png).unwrap().width(), 300);

    let jpg = dir.path().join("qr.jpg");
    generator.to_file(&jpg).unwrap();
    assert_eq!(image::ImageFormat::from_path(&jpg).unwrap(), ImageFormat::Jpeg);
    assert_eq!(image::open(&jpg).unwrap().height(), 300);

    let svg = dir.path().join("qr.svg");
    generator.to_svg_file(&svg).unwrap();
    assert!(std::fs::read_to_string(&svg).unwrap().contains("<svg"));
}

#[test]
fn validation_happens_before_drawing() {
    let too_round = QrOptions { module_radius: Some(0.6), ..options("x") };
    assert!(matches!(QrGenerator::new(too_round), Err(Error::Configuration(_))));

    let too_small = QrOptions { size: Some(50), ..options("x") };
    assert!(matches!(QrGenerator::new(too_small), Err(Error::Configuration(_))));

    let wifi = QrOptions {
        data_type: Some(DataType::Wifi),
        data: Some(json!({})),
        ..QrOptions::default()
    };
    assert!(matches!(QrGenerator::new(wifi), Err(Error::Configuration(_))));
}

#[test]
fn missing_logo_aborts_render() {
    let generator = QrGenerator::new(QrOptions {
        logo: Some("/no/such/logo.png".into()),
        ..options("x")
    })
    .unwrap();
    assert!(matches!(generator.generate(), Err(Error::LogoLoad { .. })));
    assert!(matches!(generator.to_svg(), Err(Error::LogoLoad { .. })));
}

#[test]
fn structured_payloads_render() {
    for (kind, data) in [
        (DataType::Vcard, json!({"firstName": "John", "lastName": "Doe"})),
        (DataType::Wifi, json!({"ssid": "MyNetwork", "password": "SecurePass123"})),
        (DataType::Email, json!({"email": "contact@example.com", "subject": "Hello"})),
        (DataType::Sms, json!({"phone": "+1234567890", "message": "Hi"})),
        (DataType::Geo, json!({"latitude": 40.7128, "longitude": -74.006})),
    ] {
        let generator = QrGenerator::new(QrOptions {
            data_type: Some(kind),
            data: Some(data),
            size: Some(200),
            ..QrOptions::default()
        })
        .unwrap();
        assert!(!generator.to_buffer(RasterFormat::Png).unwrap().is_empty());
    }
}

#[test]
fn with_options_returns_new_generator() {
    let original = QrGenerator::new(options("https://example.com")).unwrap();
    let patched = original
        .with_options(&QrOptions { color: Some("#00ff00".into()), ..QrOptions::default() })
        .unwrap();
    assert_eq!(patched.config().foreground.as_str(), "#00ff00");
    assert_eq!(original.config().foreground.as_str(), "#000000");
    assert_eq!(patched.content(), "https://example.com");

    let invalid = original.with_options(&QrOptions { size: Some(10), ..QrOptions::default() });
    assert!(invalid.is_err());
}
