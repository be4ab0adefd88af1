use std::path::{Path, PathBuf};

use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use nes_chr::*;

/// iNES ROM の CHR データを画像 (または生データ) として書き出す。
#[derive(Debug, StructOpt)]
struct Opt {
    /// 組み込み配色
    #[structopt(long, default_value = "0", parse(try_from_str = parse_palette))]
    palette: usize,

    /// このバンクのみ取り出す
    #[structopt(long)]
    bank: Option<usize>,

    /// 画像ではなく CHR 生データを書き出す
    #[structopt(long)]
    raw: bool,

    #[structopt(parse(from_os_str))]
    path_rom: PathBuf,

    #[structopt(parse(from_os_str))]
    path_out: PathBuf,
}

fn parse_palette(s: &str) -> eyre::Result<usize> {
    let index: usize = s.parse()?;
    eyre::ensure!(
        index < Palette::scheme_count(),
        "palette must be within 0..{}",
        Palette::scheme_count()
    );

    Ok(index)
}

fn write<G: GraphicRom + ?Sized>(
    g: &G,
    plt: &Palette,
    raw: bool,
    path: &Path,
) -> eyre::Result<()> {
    if raw {
        save_chunk(g, path)?;
    } else {
        save_image(g, plt, path)?;
    }

    Ok(())
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = Opt::from_args();

    let rom = Rom::from_file(&opt.path_rom)?;
    let chr = rom.chr();
    let plt = Palette::from_scheme(opt.palette)?;

    match opt.bank {
        Some(i) => write(chr.bank(i)?, &plt, opt.raw, &opt.path_out)?,
        None => write(&chr, &plt, opt.raw, &opt.path_out)?,
    }

    info!("wrote {}", opt.path_out.display());

    Ok(())
}
