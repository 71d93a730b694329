use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use image::ImageEncoder;
use tracing_subscriber::prelude::*;
use yuy2_decode::{ColorMatrix, ColorRange, DecodeOptions, DecodeYuy2, OpInputs, Registry};

/// 出力フォーマット
#[derive(Debug, Default, Clone, Copy, PartialEq, ValueEnum)]
enum OutFmt {
    #[default]
    Png,
    /// R G B を並べただけのバイト列
    Raw,
}

impl OutFmt {
    fn extension(&self) -> &'static str {
        match self {
            OutFmt::Png => "png",
            OutFmt::Raw => "rgb",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Range {
    Limited,
    Full,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Matrix {
    Bt601,
    Bt709,
    Bt2020,
}

/// YUY2のRAWファイルをRGB画像に変換する
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// YUY2のRAWファイル
    input: PathBuf,
    #[arg(long)]
    width: u32,
    #[arg(long)]
    height: u32,
    /// 未指定の場合は入力ファイルの拡張子を変えたもの
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutFmt::Png)]
    format: OutFmt,
    #[arg(long, value_enum, default_value_t = Range::Limited)]
    range: Range,
    #[arg(long, value_enum, default_value_t = Matrix::Bt601)]
    matrix: Matrix,
}

impl Args {
    fn options(&self) -> DecodeOptions {
        DecodeOptions {
            range: match self.range {
                Range::Limited => ColorRange::Limited,
                Range::Full => ColorRange::Full,
            },
            matrix: match self.matrix {
                Matrix::Bt601 => ColorMatrix::Bt601,
                Matrix::Bt709 => ColorMatrix::Bt709,
                Matrix::Bt2020 => ColorMatrix::Bt2020,
            },
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension(self.format.extension()))
    }
}

fn size_tensor(width: u32, height: u32) -> anyhow::Result<[i32; 2]> {
    Ok([i32::try_from(height)?, i32::try_from(width)?])
}

fn run(args: &Args) -> anyhow::Result<PathBuf> {
    let input = fs_err::read(&args.input)?;
    tracing::info!(
        "read {} ({} bytes) as {}x{}",
        args.input.display(),
        input.len(),
        args.width,
        args.height
    );

    // 指定されたレンジと行列でopを登録する
    let mut reg = Registry::new();
    reg.register(DecodeYuy2::NAME, DecodeYuy2::new(args.options()))?;
    let size = size_tensor(args.width, args.height)?;
    let rgb = reg.call(DecodeYuy2::NAME, OpInputs::new(&input, &size))?;
    let buf = rgb.as_slice().ok_or_else(|| anyhow::anyhow!("output is not contiguous"))?;

    let path = args.output_path();
    let mut writer = BufWriter::new(fs_err::File::create(&path)?);
    match args.format {
        OutFmt::Png => {
            image::codecs::png::PngEncoder::new(&mut writer)
                .write_image(buf, args.width, args.height, image::ExtendedColorType::Rgb8)
                .inspect_err(|e| tracing::error!("Failed to encode PNG: {:?}", e))?;
        }
        OutFmt::Raw => writer.write_all(buf)?,
    }
    writer.flush()?;
    tracing::info!("wrote {}", path.display());
    Ok(path)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    run(&args)?;
    Ok(())
}
