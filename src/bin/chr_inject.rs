use std::path::PathBuf;

use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use nes_chr::*;

/// 画像 (または CHR 生データ) を iNES ROM の CHR 領域に書き込む。
#[derive(Debug, StructOpt)]
struct Opt {
    /// 画像の描画に使った組み込み配色
    #[structopt(long, default_value = "0", parse(try_from_str = parse_palette))]
    palette: usize,

    /// このバンクのみ置き換える
    #[structopt(long)]
    bank: Option<usize>,

    /// 入力を画像ではなく CHR 生データとして扱う
    #[structopt(long)]
    raw: bool,

    #[structopt(parse(from_os_str))]
    path_rom: PathBuf,

    #[structopt(parse(from_os_str))]
    path_in: PathBuf,

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

fn main() -> eyre::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = Opt::from_args();

    let mut rom = Rom::from_file(&opt.path_rom)?;
    let mut chr = rom.chr();
    let plt = Palette::from_scheme(opt.palette)?;

    match (opt.bank, opt.raw) {
        (Some(i), true) => chr.set_bank(i, Bank::from_file(&opt.path_in)?)?,
        (Some(i), false) => {
            let mut bank = chr.bank(i)?.clone();
            set_from_image_file(&mut bank, &plt, &opt.path_in)?;
            chr.set_bank(i, bank)?;
        }
        (None, true) => chr = Chr::from_file(&opt.path_in)?,
        (None, false) => set_from_image_file(&mut chr, &plt, &opt.path_in)?,
    }

    rom.update_chr(&chr)?;
    rom.save(&opt.path_out)?;

    info!("wrote {}", opt.path_out.display());

    Ok(())
}
