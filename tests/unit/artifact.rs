use super::*;
use crate::generate::service::encode_png;

fn png(width: u32, height: u32) -> Vec<u8> {
    encode_png(&image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([40, 80, 120]),
    ))
    .unwrap()
}

#[test]
fn payload_is_probed_for_format_and_size() {
    let a = ArtifactRef::from_payload(png(16, 9)).unwrap();
    assert_eq!(a.format(), ImageFormat::Png);
    assert_eq!((a.width(), a.height()), (16, 9));
    assert_eq!(a.mime_type(), "image/png");
    assert_eq!(a.extension(), "png");
    assert!(!a.bytes().is_empty());
}

#[test]
fn empty_payload_fails_with_descriptive_message() {
    let err = ArtifactRef::from_payload(Vec::new()).unwrap_err();
    assert_eq!(err.user_message(), "Failed to generate image data.");
}

#[test]
fn garbage_payload_is_rejected() {
    let err = ArtifactRef::from_payload(b"definitely not an image".to_vec()).unwrap_err();
    assert!(matches!(err, CametraxError::GenerationFailed(_)));
}

#[test]
fn truncated_png_is_rejected() {
    let mut bytes = png(8, 8);
    bytes.truncate(12);
    assert!(ArtifactRef::from_payload(bytes).is_err());
}

#[test]
fn png_cut_inside_image_data_is_rejected() {
    let noisy = image::RgbImage::from_fn(64, 64, |x, y| {
        image::Rgb([(x * 7 + y * 13) as u8, (x * y) as u8, (x ^ y) as u8])
    });
    let mut bytes = encode_png(&noisy).unwrap();
    bytes.truncate(bytes.len() / 2);

    let header = ImageReader::new(Cursor::new(bytes.as_slice())).with_guessed_format().unwrap();
    assert_eq!(header.into_dimensions().unwrap(), (64, 64));

    let err = ArtifactRef::from_payload(bytes).unwrap_err();
    assert!(matches!(err, CametraxError::GenerationFailed(_)));
}

#[test]
fn ids_are_unique_and_handles_share() {
    let a = ArtifactRef::from_payload(png(2, 2)).unwrap();
    let b = ArtifactRef::from_payload(png(2, 2)).unwrap();
    assert_ne!(a.id(), b.id());
    assert_ne!(a, b);

    let a2 = a.clone();
    assert_eq!(a, a2);
    assert!(a.same_as(&a2));
    assert_eq!(a.holders(), 2);
    drop(a2);
    assert_eq!(a.holders(), 1);
}

#[test]
fn write_to_creates_parent_dirs() {
    let dir = std::path::PathBuf::from("target")
        .join("unit_artifact")
        .join(format!("{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("nested").join("out.png");

    let a = ArtifactRef::from_payload(png(3, 3)).unwrap();
    a.write_to(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), a.bytes());
}
