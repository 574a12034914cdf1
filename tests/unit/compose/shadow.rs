use super::*;

fn painted(img: &RasterImage) -> Vec<(u32, u32)> {
    img.enumerate_pixels()
        .filter(|(_, _, p)| p.0[3] != 0)
        .map(|(x, y, _)| (x, y))
        .collect()
}

#[test]
fn default_shadow_stays_inside_its_box() {
    let mut canvas = RasterImage::new(32, 32);
    let shadow = Shadow::default();
    shadow.draw(&mut canvas, 0);

    let px = painted(&canvas);
    assert!(!px.is_empty());
    for (x, y) in &px {
        assert!((10..=22).contains(x) && (27..=31).contains(y), "({x},{y})");
    }
    // The middle row spans the full width, the corners stay empty.
    for x in 10..=22 {
        assert!(px.contains(&(x, 29)));
    }
    assert!(!px.contains(&(10, 27)));
    assert!(!px.contains(&(22, 31)));
    assert!(px.contains(&(16, 27)));
    assert_eq!(canvas.get_pixel(16, 29).0, [32, 44, 32, 110]);
}

#[test]
fn shadow_shifts_with_dx_and_is_symmetric() {
    let mut a = RasterImage::new(32, 32);
    let mut b = RasterImage::new(32, 32);
    Shadow::default().draw(&mut a, 0);
    Shadow::default().draw(&mut b, 3);

    let shifted: Vec<(u32, u32)> = painted(&a).into_iter().map(|(x, y)| (x + 3, y)).collect();
    assert_eq!(painted(&b), shifted);

    for (x, y) in painted(&a) {
        assert!(painted(&a).contains(&(32 - x, y)), "mirror of ({x},{y})");
    }
}

#[test]
fn shadow_clips_at_canvas_edge() {
    let mut canvas = RasterImage::new(16, 30);
    Shadow::default().draw(&mut canvas, 0);
    for (x, y) in painted(&canvas) {
        assert!(x < 16 && y < 30);
    }
    assert!(!painted(&canvas).is_empty());
}

#[test]
fn zero_alpha_shadow_draws_nothing() {
    let mut canvas = RasterImage::new(32, 32);
    let shadow = Shadow {
        color: Rgba8::new(0, 0, 0, 0),
        ..Shadow::default()
    };
    shadow.draw(&mut canvas, 0);
    assert!(painted(&canvas).is_empty());
}

#[test]
fn extreme_box_and_shift_do_not_overflow() {
    let mut canvas = RasterImage::new(32, 32);
    let shadow = Shadow {
        left: i32::MAX - 1,
        top: 0,
        right: i32::MAX,
        bottom: i32::MAX,
        ..Shadow::default()
    };
    shadow.draw(&mut canvas, i32::MAX);
    shadow.draw(&mut canvas, i32::MIN);
    Shadow::default().draw(&mut canvas, i32::MIN);
    Shadow::default().draw(&mut canvas, i32::MAX);
    assert!(painted(&canvas).is_empty());
}
