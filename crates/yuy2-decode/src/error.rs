use crate::backend::Status;

pub type Result<T> = std::result::Result<T, Error>;

/// 変換ライブラリが返したステータスを段階ごとに保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("unable to convert yuy2 to argb: {0}")]
    Yuy2ToArgbFailed(Status),
    #[error("unable to convert argb to rgb: {0}")]
    ArgbToRgbFailed(Status),
}

impl ConversionError {
    pub const fn status(&self) -> Status {
        match self {
            ConversionError::Yuy2ToArgbFailed(s) | ConversionError::ArgbToRgbFailed(s) => *s,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("size must have 2 elements [height, width], but it has {0}")]
    InvalidSizeShape(usize),
    #[error("size must be non-negative: height={height}, width={width}")]
    NegativeDimension { height: i64, width: i64 },
    #[error("image size overflows the address space: {height}x{width}")]
    DimensionsOverflow { height: u32, width: u32 },
    #[error("failed to allocate {len} bytes")]
    OutOfMemory { len: usize },
    #[error("operation not found: {0}")]
    NotFound(String),
    #[error("operation already registered: {0}")]
    AlreadyRegistered(String),
}

impl Error {
    /// ホスト側でInvalidArgumentとして扱うべきエラーかどうか
    ///
    /// レジストリの検索失敗は呼び出し側の構成ミス、確保失敗は資源不足なので含めない
    pub const fn is_invalid_argument(&self) -> bool {
        !matches!(
            self,
            Error::NotFound(_) | Error::AlreadyRegistered(_) | Error::OutOfMemory { .. }
        )
    }
}
