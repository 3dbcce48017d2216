//! Binary morphology regression test
//!
//! Erosion, dilation, opening and closing on synthetic block images.

use imagetools_core::Grid;
use imagetools_morph::{close, dilate, erode, open};
use imagetools_test::{RegParams, patterns};

/// True when every pixel set in `result` is also set in `original`
fn within(result: &Grid, original: &Grid) -> bool {
    result
        .data()
        .iter()
        .zip(original.data())
        .all(|(&r, &o)| r == 0.0 || o != 0.0)
}

#[test]
fn binmorph_reg() {
    let mut rp = RegParams::new("binmorph");

    // Two blocks and an isolated speck
    let big = patterns::filled_rect(64, 48, 6, 6, 20, 14);
    let small = patterns::filled_rect(64, 48, 36, 20, 12, 18);
    let mut image = big.add(&small, false).expect("same size");
    image.set_pixel(58, 4, 1.0).unwrap();

    // --- Test 1-3: opening never sets a pixel that was off ---
    for size in [1, 2, 3] {
        let opened = open(&image, size).expect("open");
        rp.check(within(&opened, &image));
    }

    // --- Test 4: opening removes the speck and keeps the blocks ---
    let opened = open(&image, 3).expect("open");
    rp.compare_values(0.0, opened.get_pixel(58, 4).unwrap() as f64, 0.0);
    rp.check(opened.get_pixel(15, 12).unwrap() > 0.0);
    rp.check(opened.get_pixel(42, 28).unwrap() > 0.0);

    // --- Test 5: erosion output is binary and shrinks the blocks ---
    let eroded = erode(&image, 3).expect("erode");
    rp.check(eroded.data().iter().all(|&v| v == 0.0 || v == 1.0));
    rp.compare_values((18 * 12 + 10 * 16) as f64, eroded.sum(), 0.0);

    // --- Test 6: dilation is normalised and reaches one pixel further ---
    let dilated = dilate(&image, 3).expect("dilate");
    rp.compare_values(1.0, dilated.max_value() as f64, 0.0);
    rp.check(dilated.get_pixel(5, 5).unwrap() > 0.0);
    rp.compare_values(0.0, dilated.get_pixel(4, 4).unwrap() as f64, 0.0);

    // --- Test 7: closing fills a one-pixel hole ---
    let mut holed = patterns::filled_rect(16, 16, 2, 2, 10, 10);
    holed.set_pixel(7, 7, 0.0).unwrap();
    let closed = close(&holed, 3).expect("close");
    rp.compare_values(1.0, closed.get_pixel(7, 7).unwrap() as f64, 0.0);

    // --- Test 8: invalid size ---
    rp.check(erode(&image, 0).is_err());

    rp.write_grid_and_check(&opened).expect("write opened");

    assert!(rp.cleanup(), "binmorph regression test failed");
}
