use super::*;

#[test]
fn unorm8_scaling_truncates_and_clamps() {
    assert_eq!(encode_unorm8(0.0), 0);
    assert_eq!(encode_unorm8(1.0), 255);
    assert_eq!(encode_unorm8(2.0), 255);
    assert_eq!(encode_unorm8(-1.0), 0);
    assert_eq!(encode_unorm8(f32::NAN), 0);
    // 0.5 * 255 = 127.5 truncates toward zero.
    assert_eq!(encode_unorm8(0.5), 127);
    assert_eq!(decode_unorm8(255), 1.0);
    assert_eq!(decode_unorm8(0), 0.0);
}

#[test]
fn rgb888_bytes_are_r_then_g_then_b() {
    let mut bytes = [0u8; 4];
    write_pixel(
        RtFormat::RGB888,
        &mut bytes,
        1,
        Pixel::new(1.0, 0.0, 0.2, 1.0),
    );
    assert_eq!(bytes, [0, 255, 0, 51]);
}

#[test]
fn rg88_ignores_blue_and_alpha() {
    let mut bytes = [7u8; 3];
    write_pixel(RtFormat::RG88, &mut bytes, 0, Pixel::new(0.0, 1.0, 1.0, 1.0));
    assert_eq!(bytes, [0, 255, 7]);

    let px = read_pixel(RtFormat::RG88, &bytes, 0);
    assert_eq!(px, Pixel::new(0.0, 1.0, 0.0, 0.0));
}

#[test]
fn float_channels_are_stored_raw() {
    let mut bytes = [0u8; 12];
    let src = Pixel::new(-3.5, 1e6, 0.125, 9.0);
    write_pixel(RtFormat::RGBFFF, &mut bytes, 0, src);
    assert_eq!(bytemuck::pod_read_unaligned::<f32>(&bytes[0..4]), -3.5);
    assert_eq!(bytemuck::pod_read_unaligned::<f32>(&bytes[4..8]), 1e6);
    assert_eq!(bytemuck::pod_read_unaligned::<f32>(&bytes[8..12]), 0.125);

    let back = read_pixel(RtFormat::RGBFFF, &bytes, 0);
    assert_eq!(back, Pixel::rgb(-3.5, 1e6, 0.125));
}

#[test]
fn single_channel_float_only_touches_four_bytes() {
    let mut bytes = [0xAAu8; 6];
    write_pixel(RtFormat::RF, &mut bytes, 1, Pixel::rgb(2.0, 3.0, 4.0));
    assert_eq!(bytes[0], 0xAA);
    assert_eq!(bytes[5], 0xAA);
    assert_eq!(read_pixel(RtFormat::RF, &bytes, 1), Pixel::rgb(2.0, 0.0, 0.0));
}
