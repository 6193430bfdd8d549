use enroll::preview::draw_box;
use image::{Rgb, RgbImage};
use vision::FaceRect;

#[test]
fn draws_a_two_pixel_outline() {
    let mut frame = RgbImage::new(20, 20);
    let red = Rgb([255, 0, 0]);
    draw_box(&mut frame, FaceRect::new(2, 2, 10, 10), red);

    assert_eq!(*frame.get_pixel(2, 2), red);
    assert_eq!(*frame.get_pixel(3, 6), red);
    assert_eq!(*frame.get_pixel(11, 11), red);
    assert_eq!(*frame.get_pixel(10, 6), red);
    assert_eq!(*frame.get_pixel(6, 6), Rgb([0, 0, 0]));
    assert_eq!(*frame.get_pixel(12, 12), Rgb([0, 0, 0]));
}

#[test]
fn boxes_past_the_edge_are_clipped() {
    let mut frame = RgbImage::new(10, 10);
    draw_box(&mut frame, FaceRect::new(6, 6, 10, 10), Rgb([0, 255, 0]));
    assert_eq!(*frame.get_pixel(9, 9), Rgb([0, 255, 0]));
    draw_box(&mut frame, FaceRect::new(30, 30, 4, 4), Rgb([0, 255, 0]));
}
