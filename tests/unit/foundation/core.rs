use super::*;

#[test]
fn pixel_channels_follow_rgba_order() {
    let mut p = Pixel::new(0.1, 0.2, 0.3, 0.4);
    assert_eq!(p.channel(0), 0.1);
    assert_eq!(p.channel(3), 0.4);
    assert_eq!(p.channel(7), 0.0);

    p.set_channel(1, 0.9);
    p.set_channel(9, 5.0);
    assert_eq!(p, Pixel::new(0.1, 0.9, 0.3, 0.4));
}

#[test]
fn pixel_lerp_endpoints_and_midpoint() {
    let a = Pixel::new(0.0, 1.0, 2.0, 3.0);
    let b = Pixel::new(1.0, 1.0, 0.0, 1.0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Pixel::new(0.5, 1.0, 1.0, 2.0));
}

#[test]
fn allocator_ids_are_unique_and_ordered() {
    let ids = TargetIdAllocator::new();
    let a = ids.issue();
    let b = ids.issue();
    assert_eq!(a, TargetId(0));
    assert_eq!(b, TargetId(1));

    let other = TargetIdAllocator::starting_at(40);
    assert_eq!(other.issue(), TargetId(40));
    assert_eq!(other.issue().to_string(), "rt#41");
}
