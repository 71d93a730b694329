//! YUY2 -> ARGB -> RGB の2段変換

use crate::{
    backend::{PixelConverter, Status, YuvConverter},
    error::{ConversionError, Error, Result},
};

/// YUY2は2ピクセルで4バイト
pub const YUY2_BYTES_PER_PIXEL: usize = 2;
pub const ARGB_BYTES_PER_PIXEL: usize = 4;
pub const RGB_BYTES_PER_PIXEL: usize = 3;

/// 画像の縦横
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub height: u32,
    pub width: u32,
}

impl Dimensions {
    pub const fn new(height: u32, width: u32) -> Self {
        Dimensions { height, width }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    pub fn yuy2_stride(&self) -> Result<u32> {
        self.stride(YUY2_BYTES_PER_PIXEL)
    }

    pub fn argb_stride(&self) -> Result<u32> {
        self.stride(ARGB_BYTES_PER_PIXEL)
    }

    pub fn rgb_stride(&self) -> Result<u32> {
        self.stride(RGB_BYTES_PER_PIXEL)
    }

    pub fn yuy2_len(&self) -> Result<usize> {
        self.len(YUY2_BYTES_PER_PIXEL)
    }

    pub fn argb_len(&self) -> Result<usize> {
        self.len(ARGB_BYTES_PER_PIXEL)
    }

    pub fn rgb_len(&self) -> Result<usize> {
        self.len(RGB_BYTES_PER_PIXEL)
    }

    // ライブラリに渡すstrideはu32なので、そこに収まらない幅はエラーにする
    fn stride(&self, bpp: usize) -> Result<u32> {
        self.width
            .checked_mul(bpp as u32)
            .ok_or_else(|| self.overflow())
    }

    fn len(&self, bpp: usize) -> Result<usize> {
        (self.height as usize)
            .checked_mul(self.width as usize)
            .and_then(|n| n.checked_mul(bpp))
            .ok_or_else(|| self.overflow())
    }

    fn overflow(&self) -> Error {
        Error::DimensionsOverflow {
            height: self.height,
            width: self.width,
        }
    }
}

// 確保に失敗したらabortせずにエラーを返す
fn zeroed(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::OutOfMemory { len })?;
    buf.resize(len, 0);
    Ok(buf)
}

/// デフォルトの変換ライブラリでYUY2をRGBに変換する
///
/// 戻り値は`height * width * 3`バイトで、行ごとに`width * 3`バイトのR G B
pub fn convert(input: &[u8], height: u32, width: u32) -> Result<Vec<u8>> {
    convert_with(&YuvConverter::default(), input, Dimensions::new(height, width))
}

/// 変換ライブラリを指定してYUY2をRGBに変換する
///
/// 入力長が`height * width * 2`より長い場合は先頭だけを使う。
/// 短い場合はバッファを確保する前に`Yuy2ToArgbFailed`で失敗させる
pub fn convert_with<C>(converter: &C, input: &[u8], dims: Dimensions) -> Result<Vec<u8>>
where
    C: PixelConverter + ?Sized,
{
    tracing::debug!(
        "convert yuy2 {}x{} ({} bytes)",
        dims.width,
        dims.height,
        input.len()
    );
    // 0サイズの画像はライブラリが受け付けないので呼び出さずに空を返す
    if dims.is_empty() {
        return Ok(Vec::new());
    }

    let yuy2_stride = dims.yuy2_stride()?;
    let argb_stride = dims.argb_stride()?;
    let rgb_stride = dims.rgb_stride()?;
    // sizeだけ大きい入力で巨大なバッファを確保しないよう、先に入力長を見る
    let yuy2_len = dims.yuy2_len()?;
    let Some(src) = input.get(..yuy2_len) else {
        tracing::error!("yuy2 input too short: {} < {yuy2_len}", input.len());
        return Err(ConversionError::Yuy2ToArgbFailed(Status::SIZE_MISMATCH).into());
    };

    let mut argb = zeroed(dims.argb_len()?)?;
    let status = converter.yuy2_to_argb(
        src,
        yuy2_stride,
        &mut argb,
        argb_stride,
        dims.width,
        dims.height,
    );
    if !status.is_ok() {
        tracing::error!("Failed to convert yuy2 to argb: {status}");
        return Err(ConversionError::Yuy2ToArgbFailed(status).into());
    }

    let mut rgb = zeroed(dims.rgb_len()?)?;
    let status = converter.argb_to_raw(
        &argb,
        argb_stride,
        &mut rgb,
        rgb_stride,
        dims.width,
        dims.height,
    );
    if !status.is_ok() {
        tracing::error!("Failed to convert argb to rgb: {status}");
        return Err(ConversionError::ArgbToRgbFailed(status).into());
    }
    Ok(rgb)
}
