//! ホストから呼び出されるオペレーション

use ndarray::{Array3, ArrayView1};

use crate::{
    backend::{DecodeOptions, PixelConverter, YuvConverter},
    convert::{convert_with, Dimensions, RGB_BYTES_PER_PIXEL},
    error::{Error, Result},
};

/// オペレーションへの入力
///
/// `input`はスカラーのバイト列、`size`は`[height, width]`
#[derive(Debug, Clone, Copy)]
pub struct OpInputs<'a> {
    pub input: &'a [u8],
    pub size: ArrayView1<'a, i32>,
}

impl<'a> OpInputs<'a> {
    pub fn new(input: &'a [u8], size: &'a [i32]) -> Self {
        OpInputs {
            input,
            size: ArrayView1::from(size),
        }
    }
}

/// レジストリに登録できるオペレーション
pub trait Op {
    fn compute(&self, inputs: OpInputs<'_>) -> Result<Array3<u8>>;
}

/// YUY2のバイト列を`(height, width, 3)`のRGBテンソルにする
#[derive(Debug, Clone)]
pub struct DecodeYuy2<C = YuvConverter> {
    converter: C,
}

impl DecodeYuy2 {
    pub const NAME: &'static str = "IO>DecodeYUY2";

    pub fn new(options: DecodeOptions) -> Self {
        DecodeYuy2 {
            converter: YuvConverter::new(options),
        }
    }
}

impl Default for DecodeYuy2 {
    fn default() -> Self {
        DecodeYuy2::new(DecodeOptions::default())
    }
}

impl<C: PixelConverter> DecodeYuy2<C> {
    pub fn with_converter(converter: C) -> Self {
        DecodeYuy2 { converter }
    }
}

/// sizeテンソルから縦横を取り出す
pub fn parse_size(size: ArrayView1<'_, i32>) -> Result<Dimensions> {
    if size.len() != 2 {
        return Err(Error::InvalidSizeShape(size.len()));
    }
    let (height, width) = (size[0], size[1]);
    match (u32::try_from(height), u32::try_from(width)) {
        (Ok(height), Ok(width)) => Ok(Dimensions::new(height, width)),
        _ => Err(Error::NegativeDimension {
            height: height.into(),
            width: width.into(),
        }),
    }
}

impl<C: PixelConverter> Op for DecodeYuy2<C> {
    fn compute(&self, inputs: OpInputs<'_>) -> Result<Array3<u8>> {
        let dims = parse_size(inputs.size)?;
        let rgb = convert_with(&self.converter, inputs.input, dims)?;
        let shape = (
            dims.height as usize,
            dims.width as usize,
            RGB_BYTES_PER_PIXEL,
        );
        // convert_withの出力長はshapeと一致する
        Array3::from_shape_vec(shape, rgb).map_err(|_| Error::DimensionsOverflow {
            height: dims.height,
            width: dims.width,
        })
    }
}
