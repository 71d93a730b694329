//! 色変換ライブラリとの境界
//!
//! 変換処理そのものは外部ライブラリに任せ、ここではlibyuvと同じ形の
//! `YUY2ToARGB` / `ARGBToRAW` 呼び出しとステータスコードだけを定義する

use std::fmt;

use yuv::{YuvError, YuvPackedImage, YuvRange, YuvStandardMatrix};

/// 変換ライブラリの戻り値。0が成功
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(pub i32);

impl Status {
    pub const OK: Status = Status(0);
    /// 引数が不正
    pub const INVALID_ARGUMENT: Status = Status(-1);
    pub const ZERO_SIZE: Status = Status(-2);
    pub const OVERFLOW: Status = Status(-3);
    /// バッファ長やstrideが縦横に対して足りない
    pub const SIZE_MISMATCH: Status = Status(-4);

    #[inline]
    pub const fn is_ok(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&YuvError> for Status {
    fn from(e: &YuvError) -> Self {
        match e {
            YuvError::ZeroBaseSize => Status::ZERO_SIZE,
            YuvError::PointerOverflow => Status::OVERFLOW,
            YuvError::DestinationSizeMismatch(_)
            | YuvError::LumaPlaneSizeMismatch(_)
            | YuvError::LumaPlaneMinimumSizeMismatch(_) => Status::SIZE_MISMATCH,
            _ => Status::INVALID_ARGUMENT,
        }
    }
}

/// YUVのレンジ
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRange {
    /// Y: 16-235, UV: 16-240
    #[default]
    Limited,
    Full,
}

impl From<ColorRange> for YuvRange {
    fn from(r: ColorRange) -> Self {
        match r {
            ColorRange::Limited => YuvRange::Limited,
            ColorRange::Full => YuvRange::Full,
        }
    }
}

/// YUVからRGBへの変換行列
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMatrix {
    #[default]
    Bt601,
    Bt709,
    Bt2020,
}

impl From<ColorMatrix> for YuvStandardMatrix {
    fn from(m: ColorMatrix) -> Self {
        match m {
            ColorMatrix::Bt601 => YuvStandardMatrix::Bt601,
            ColorMatrix::Bt709 => YuvStandardMatrix::Bt709,
            ColorMatrix::Bt2020 => YuvStandardMatrix::Bt2020,
        }
    }
}

/// 変換時の色の解釈
///
/// デフォルトはlibyuvの`YUY2ToARGB`と同じBT.601 Limited
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub range: ColorRange,
    pub matrix: ColorMatrix,
}

/// 外部の色変換ライブラリ
///
/// 引数の並びはlibyuvに合わせている。strideは1行あたりのバイト数
pub trait PixelConverter {
    /// YUY2(Y0 U Y1 V)をARGB(メモリ上はB G R A)に変換する
    fn yuy2_to_argb(
        &self,
        src: &[u8],
        src_stride: u32,
        dst: &mut [u8],
        dst_stride: u32,
        width: u32,
        height: u32,
    ) -> Status;

    /// ARGBをRAW(メモリ上はR G B)に変換する
    fn argb_to_raw(
        &self,
        src: &[u8],
        src_stride: u32,
        dst: &mut [u8],
        dst_stride: u32,
        width: u32,
        height: u32,
    ) -> Status;
}

/// `yuv`クレートによる実装
#[derive(Debug, Default, Clone, Copy)]
pub struct YuvConverter {
    options: DecodeOptions,
}

impl YuvConverter {
    pub fn new(options: DecodeOptions) -> Self {
        YuvConverter { options }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }
}

/// 奇数幅のYUY2を偶数幅のstrideに詰め直す
///
/// 各行の末尾はY Uだけなので、Y1にはY0を、Vには直前の対のVを補う。
/// 1ピクセル幅で直前の対が無い場合のVは128
fn pad_odd_width(src: &[u8], src_stride: usize, width: usize, height: usize) -> Option<Vec<u8>> {
    let row_len = width * 2;
    let padded_stride = width.div_ceil(2) * 4;
    let mut dst = Vec::new();
    dst.try_reserve_exact(padded_stride.checked_mul(height)?).ok()?;
    for y in 0..height {
        let row = src.get(y * src_stride..)?.get(..row_len)?;
        dst.extend_from_slice(row);
        let y0 = row[row_len - 2];
        let v = if width >= 3 { row[row_len - 3] } else { 128 };
        dst.extend_from_slice(&[y0, v]);
    }
    Some(dst)
}

fn to_status(res: Result<(), YuvError>, stage: &'static str) -> Status {
    match res {
        Ok(()) => Status::OK,
        Err(e) => {
            let status = Status::from(&e);
            tracing::error!("{stage} rejected by yuv: {e} (status {status})");
            status
        }
    }
}

impl PixelConverter for YuvConverter {
    fn yuy2_to_argb(
        &self,
        src: &[u8],
        src_stride: u32,
        dst: &mut [u8],
        dst_stride: u32,
        width: u32,
        height: u32,
    ) -> Status {
        // yuvは奇数幅に(width + 1) * 2のstrideを要求するので詰め直して渡す
        let padded;
        let (yuy, yuy_stride) = if width % 2 == 1 {
            let Some(stride) = width.checked_add(1).and_then(|w| w.checked_mul(2)) else {
                return Status::OVERFLOW;
            };
            match pad_odd_width(src, src_stride as usize, width as usize, height as usize) {
                Some(buf) => {
                    padded = buf;
                    (padded.as_slice(), stride)
                }
                None => return Status::SIZE_MISMATCH,
            }
        } else {
            (src, src_stride)
        };
        let image = YuvPackedImage {
            yuy,
            yuy_stride,
            width,
            height,
        };
        let res = yuv::yuyv422_to_bgra(
            &image,
            dst,
            dst_stride,
            self.options.range.into(),
            self.options.matrix.into(),
        );
        to_status(res, "yuy2_to_argb")
    }

    fn argb_to_raw(
        &self,
        src: &[u8],
        src_stride: u32,
        dst: &mut [u8],
        dst_stride: u32,
        width: u32,
        height: u32,
    ) -> Status {
        let res = yuv::bgra_to_rgb(src, src_stride, dst, dst_stride, width, height);
        to_status(res, "argb_to_raw")
    }
}
