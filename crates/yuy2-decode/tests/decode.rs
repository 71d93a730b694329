use rand::{rngs::StdRng, Rng, SeedableRng};
use yuy2_decode::{
    convert, ColorRange, DecodeOptions, DecodeYuy2, Dimensions, Op, OpInputs, Registry,
};

fn uniform(dims: Dimensions, px: [u8; 4]) -> Vec<u8> {
    px.iter()
        .copied()
        .cycle()
        .take(dims.yuy2_len().unwrap())
        .collect()
}

#[test]
fn test_mid_gray() {
    let (h, w) = (8, 16);
    let input = uniform(Dimensions::new(h, w), [128, 128, 128, 128]);
    let rgb = convert(&input, h, w).unwrap();
    assert_eq!(rgb.len(), (h * w * 3) as usize);

    // Limitedレンジなので128は少し明るくなる
    let first = rgb[0];
    assert!((first as i32 - 130).abs() <= 3, "unexpected gray level {first}");
    for px in rgb.chunks_exact(3) {
        approx::assert_abs_diff_eq!(px[0] as f32, px[1] as f32, epsilon = 1.0);
        approx::assert_abs_diff_eq!(px[1] as f32, px[2] as f32, epsilon = 1.0);
        assert_eq!(px, &rgb[..3]);
    }
}

#[test]
fn test_full_range_gray() {
    let dims = Dimensions::new(2, 4);
    let input = uniform(dims, [128, 128, 128, 128]);
    let op = DecodeYuy2::new(DecodeOptions {
        range: ColorRange::Full,
        ..Default::default()
    });
    let out = op.compute(OpInputs::new(&input, &[2, 4])).unwrap();
    for &v in out.iter() {
        approx::assert_abs_diff_eq!(v as f32, 128.0, epsilon = 2.0);
    }
}

#[test]
fn test_channel_order() {
    // Vが大きいと赤、Uが大きいと青に寄る
    let dims = Dimensions::new(2, 2);
    let reddish = convert(&uniform(dims, [81, 90, 81, 240]), 2, 2).unwrap();
    assert!(reddish[0] > 200 && reddish[2] < 60, "{:?}", &reddish[..3]);

    let bluish = convert(&uniform(dims, [41, 240, 41, 110]), 2, 2).unwrap();
    assert!(bluish[2] > 200 && bluish[0] < 60, "{:?}", &bluish[..3]);
}

#[test]
fn test_deterministic() {
    let mut rng = StdRng::seed_from_u64(0x5955_5932);
    let (h, w) = (24, 32);
    let mut input = vec![0u8; (h * w * 2) as usize];
    rng.fill(&mut input[..]);

    let a = convert(&input, h, w).unwrap();
    let b = convert(&input, h, w).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_short_input_does_not_panic() {
    let mut rng = StdRng::seed_from_u64(1);
    for len in [0, 1, 7, 63, 127] {
        let mut input = vec![0u8; len];
        rng.fill(&mut input[..]);
        let res = convert(&input, 8, 8);
        assert!(res.is_err(), "len {len} must be rejected");
    }
}

#[test]
fn test_registry_call() {
    let reg = Registry::with_builtin();
    let input = uniform(Dimensions::new(4, 6), [16, 128, 16, 128]);
    let out = reg
        .call(DecodeYuy2::NAME, OpInputs::new(&input, &[4, 6]))
        .unwrap();
    assert_eq!(out.shape(), &[4, 6, 3]);
    // Y=16は黒
    assert!(out.iter().all(|&v| v <= 2));

    let err = reg
        .call(DecodeYuy2::NAME, OpInputs::new(&input, &[4]))
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_short_input_with_large_size() {
    let err = convert(&[0u8; 16], 65535, 65535).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().starts_with("unable to convert yuy2 to argb"));
}

#[test]
fn test_odd_width() {
    for (h, w) in [(1, 1), (2, 3), (4, 5)] {
        let input = vec![128u8; (h * w * 2) as usize];
        let rgb = convert(&input, h, w).unwrap();
        assert_eq!(rgb.len(), (h * w * 3) as usize, "{h}x{w}");
        for px in rgb.chunks_exact(3) {
            assert!((px[0] as i32 - 130).abs() <= 3, "{h}x{w}: {px:?}");
            approx::assert_abs_diff_eq!(px[0] as f32, px[2] as f32, epsilon = 1.0);
        }
    }
}

#[test]
fn test_odd_width_last_pixel_keeps_chroma() {
    // 1行が (Y U Y V) (Y U) の3ピクセル。最後のピクセルも直前のVで赤になる
    let row = [81u8, 90, 81, 240, 81, 90];
    let input = row.repeat(2);
    let rgb = convert(&input, 2, 3).unwrap();
    for px in rgb.chunks_exact(3) {
        assert!(px[0] > 200 && px[2] < 60, "{px:?}");
    }
}
