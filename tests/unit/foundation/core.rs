use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 32).is_err());
    assert!(Canvas::new(32, 0).is_err());
    let c = Canvas::new(32, 16).unwrap();
    let blank = c.blank();
    assert_eq!(blank.dimensions(), (32, 16));
    assert!(blank.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn bounding_box_expand_clamps_to_image() {
    let b = BoundingBox {
        left: 1,
        top: 5,
        right: 9,
        bottom: 10,
    };
    let e = b.expand_clamped(2, 10, 11);
    assert_eq!(
        e,
        BoundingBox {
            left: 0,
            top: 3,
            right: 10,
            bottom: 11,
        }
    );
    assert_eq!(e.width(), 10);
    assert_eq!(e.height(), 8);
}

#[test]
fn rgba8_serializes_as_array() {
    let c = Rgba8::new(32, 44, 32, 110);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "[32,44,32,110]");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}
