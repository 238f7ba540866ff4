use super::*;
use crate::generate::service::encode_png;

fn artifact() -> ArtifactRef {
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([0, 0, 0]));
    ArtifactRef::from_payload(encode_png(&img).unwrap()).unwrap()
}

#[test]
fn starts_at_the_default_split() {
    let s = ComparisonSession::new(artifact(), artifact());
    assert_eq!(s.blend_position(), DEFAULT_BLEND_POSITION);
    assert_eq!(s.current_visible_fraction(), 0.5);
}

#[test]
fn blend_position_is_clamped() {
    let mut s = ComparisonSession::new(artifact(), artifact());
    s.set_blend_position(150.0);
    assert_eq!(s.blend_position(), 100.0);
    s.set_blend_position(-3.0);
    assert_eq!(s.blend_position(), 0.0);
    s.set_blend_position(f64::NEG_INFINITY);
    assert_eq!(s.blend_position(), 0.0);
    s.set_blend_position(37.5);
    assert_eq!(s.blend_position(), 37.5);
    s.set_blend_position(f64::NAN);
    assert_eq!(s.blend_position(), 37.5);
}

#[test]
fn keeps_both_artifacts_alive() {
    let (r, c) = (artifact(), artifact());
    let s = ComparisonSession::new(r.clone(), c.clone());
    assert_eq!(s.reference(), &r);
    assert_eq!(s.current(), &c);
    assert_eq!(r.holders(), 2);
    drop(s);
    assert_eq!(r.holders(), 1);
}
