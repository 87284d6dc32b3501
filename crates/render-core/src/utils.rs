/// Blends `src` over `dst` (straight alpha), with `src` alpha scaled by `coverage`.
pub fn blend_over(dst: [u8; 4], src: [u8; 4], coverage: f32) -> [u8; 4] {
    let sa = (src[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let channel = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    [
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// The integer pixel span `[start, end)` whose centres fall inside `[from, to)`.
pub fn pixel_span(from: f32, to: f32) -> (i32, i32) {
    ((from - 0.5).ceil() as i32, (to - 0.5).ceil() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_source_replaces() {
        assert_eq!(blend_over([1, 2, 3, 255], [200, 100, 50, 255], 1.0), [200, 100, 50, 255]);
    }

    #[test]
    fn test_zero_coverage_keeps_destination() {
        assert_eq!(blend_over([1, 2, 3, 255], [200, 100, 50, 255], 0.0), [1, 2, 3, 255]);
    }

    #[test]
    fn test_half_coverage_over_opaque() {
        let out = blend_over([0, 0, 0, 255], [255, 255, 255, 255], 0.5);
        assert_eq!(out[3], 255);
        assert!((out[0] as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_over_transparent_keeps_source_color() {
        let out = blend_over([0, 0, 0, 0], [255, 0, 0, 255], 0.5);
        assert_eq!(&out[..3], &[255, 0, 0]);
        assert!((out[3] as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_pixel_span() {
        assert_eq!(pixel_span(0.0, 4.0), (0, 4));
        assert_eq!(pixel_span(0.4, 2.6), (0, 3));
        assert_eq!(pixel_span(0.6, 2.4), (1, 2));
    }
}
