use super::*;
use crate::foundation::core::TargetIdAllocator;

fn probe(x: u16, y: u16, mip: u8) -> Pixel {
    Pixel::new(
        f32::from(x) * 0.05 + 0.01,
        f32::from(y) * 0.07 + 0.02,
        f32::from(mip) * 0.2 + 0.03,
        0.9,
    )
}

#[test]
fn new_target_is_zero_filled_and_laid_out() {
    let rt = RenderTarget::new(4, 4, RtFormat::RGB888, 3).unwrap();
    assert!(rt.is_valid());
    assert_eq!(rt.pixel_size(), 3);
    assert_eq!(rt.size(), 21 * 3);
    assert_eq!(rt.layout().offsets(), &[0, 48, 60]);
    assert_eq!(rt.raw_data(1).unwrap().len(), 12);
    assert!(rt.raw_data(0).unwrap().iter().all(|&b| b == 0));
    assert!(rt.raw_data(3).is_none());
}

#[test]
fn set_get_round_trips_every_format() {
    for format in RtFormat::ALL {
        let mut rt = RenderTarget::new(8, 4, format, 3).unwrap();
        for mip in 0..rt.mip_count() {
            let dims = rt.mip_dims(mip).unwrap();
            for y in 0..dims.height {
                for x in 0..dims.width {
                    rt.set_pixel(x, y, probe(x, y, mip), mip);
                }
            }
        }
        let channels = format.channel_count();
        for mip in 0..rt.mip_count() {
            let dims = rt.mip_dims(mip).unwrap();
            for y in 0..dims.height {
                for x in 0..dims.width {
                    let want = probe(x, y, mip);
                    let got = rt.get_pixel(x, y, mip);
                    for c in 0..4 {
                        let expected = if c < channels { want.channel(c) } else { 0.0 };
                        if format.is_float() {
                            assert_eq!(got.channel(c), expected, "{format} ({x},{y}) mip {mip}");
                        } else {
                            assert!(
                                (got.channel(c) - expected).abs() <= 1.0 / 255.0,
                                "{format} ({x},{y}) mip {mip} channel {c}"
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn out_of_range_access_is_silent() {
    let mut rt = RenderTarget::new(4, 2, RtFormat::RF, 2).unwrap();
    let before = rt.raw_data(0).unwrap().to_vec();

    rt.set_pixel(4, 0, Pixel::rgb(1.0, 1.0, 1.0), 0);
    rt.set_pixel(0, 2, Pixel::rgb(1.0, 1.0, 1.0), 0);
    rt.set_pixel(2, 0, Pixel::rgb(1.0, 1.0, 1.0), 1);
    rt.set_pixel(0, 0, Pixel::rgb(1.0, 1.0, 1.0), 2);

    assert_eq!(rt.raw_data(0).unwrap(), before.as_slice());
    assert_eq!(rt.get_pixel(9, 9, 0), Pixel::default());
    assert_eq!(rt.get_pixel(0, 0, 5), Pixel::default());
    assert_eq!(rt.sample_bilinear(0.5, 0.5, 5), Pixel::default());
}

#[test]
fn pixels_land_at_documented_offsets() {
    let mut rt = RenderTarget::new(4, 4, RtFormat::R8, 3).unwrap();
    rt.set_pixel(1, 1, Pixel::rgb(1.0, 0.0, 0.0), 1);
    rt.set_pixel(0, 0, Pixel::rgb(1.0, 0.0, 0.0), 2);
    let all = {
        let mut v = Vec::new();
        for mip in 0..3 {
            v.extend_from_slice(rt.raw_data(mip).unwrap());
        }
        v
    };
    // mip 1 starts at 16, (1,1) is index 1*2+1; mip 2 starts at 20.
    assert_eq!(all[16 + 3], 255);
    assert_eq!(all[20], 255);
    assert_eq!(all.iter().filter(|&&b| b != 0).count(), 2);
}

#[test]
fn resize_discards_contents() {
    let mut rt = RenderTarget::new(2, 2, RtFormat::RGFF, 1).unwrap();
    rt.set_pixel(0, 0, Pixel::rgb(5.0, 6.0, 0.0), 0);
    rt.resize(2, 2, 1).unwrap();
    assert_eq!(rt.get_pixel(0, 0, 0), Pixel::default());

    rt.resize(8, 2, 4).unwrap();
    assert_eq!(rt.width(), 8);
    assert_eq!(rt.height(), 2);
    assert_eq!(rt.mip_count(), 4);
    assert_eq!(rt.size(), (16 + 4 + 2 + 1) * 8);
}

#[test]
fn resize_to_zero_clears() {
    let mut rt = RenderTarget::new(16, 16, RtFormat::RGB888, 5).unwrap();
    rt.resize(0, 0, 1).unwrap();
    assert!(!rt.is_valid());
    assert_eq!(rt.size(), 0);
    assert_eq!(rt.width(), 0);
    assert_eq!(rt.mip_count(), 0);
    assert!(rt.raw_data(0).is_none());
    assert_eq!(rt.get_pixel(0, 0, 0), Pixel::default());

    let empty = RenderTarget::new(0, 32, RtFormat::R8, 1).unwrap();
    assert!(!empty.is_valid());
}

#[test]
fn zero_mip_count_means_one_level() {
    let rt = RenderTarget::new(4, 4, RtFormat::R8, 0).unwrap();
    assert_eq!(rt.mip_count(), 1);
    assert_eq!(rt.size(), 16);
}

#[test]
fn ids_come_from_the_caller() {
    let ids = TargetIdAllocator::new();
    let a = RenderTarget::new(1, 1, RtFormat::R8, 1)
        .unwrap()
        .with_id(ids.issue());
    let b = RenderTarget::empty(RtFormat::RF).with_id(ids.issue());
    assert_eq!(a.id(), Some(TargetId(0)));
    assert_eq!(b.id(), Some(TargetId(1)));
    assert_eq!(RenderTarget::empty(RtFormat::R8).id(), None);
}

#[test]
fn parent_and_level_split_is_disjoint() {
    let mut rt = RenderTarget::new(4, 4, RtFormat::RGB888, 3).unwrap();
    rt.set_pixel(3, 3, Pixel::rgb(1.0, 1.0, 1.0), 0);
    let (src, mut dst) = rt.parent_and_level_mut(1).unwrap();
    assert_eq!((src.width(), src.height()), (4, 4));
    assert_eq!((dst.width(), dst.height()), (2, 2));
    assert_eq!(src.get_pixel(3, 3), Pixel::rgb(1.0, 1.0, 1.0));
    dst.set_pixel(1, 1, Pixel::rgb(0.0, 1.0, 0.0));
    assert_eq!(rt.get_pixel(1, 1, 1), Pixel::rgb(0.0, 1.0, 0.0));
    assert!(rt.parent_and_level_mut(0).is_none());
    assert!(rt.parent_and_level_mut(3).is_none());
}
