//! YUY2(YUV 4:2:2 packed)の画像をRGBのテンソルに変換する
//!
//! 色変換は`yuv`クレートに任せ、ここではstrideとバッファの確保、
//! ステータスのエラー変換、ホスト向けのオペレーション登録だけを行う

pub mod backend;
pub mod convert;
pub mod error;
pub mod op;
pub mod registry;

pub use backend::{ColorMatrix, ColorRange, DecodeOptions, PixelConverter, Status, YuvConverter};
pub use convert::{convert, convert_with, Dimensions};
pub use error::{ConversionError, Error, Result};
pub use op::{DecodeYuy2, Op, OpInputs};
pub use registry::Registry;
