use std::path::PathBuf;

use structopt::StructOpt;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use nes_chr::*;

/// iNES ROM の全 CHR バンクを `bank-NN.png` と `bank-NN.chr` に書き出す。
#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(long, default_value = "0")]
    palette: usize,

    #[structopt(parse(from_os_str))]
    path_rom: PathBuf,

    #[structopt(parse(try_from_os_str = parse_directory))]
    dir_out: PathBuf,
}

fn parse_directory(s: &std::ffi::OsStr) -> std::result::Result<PathBuf, std::ffi::OsString> {
    let dir = PathBuf::from(s);

    dir.is_dir().then(|| dir).ok_or_else(|| s.to_owned())
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = Opt::from_args();

    let rom = Rom::from_file(&opt.path_rom)?;
    let plt = Palette::from_scheme(opt.palette)?;

    for (i, bank) in rom.chr().banks().iter().enumerate() {
        save_image(bank, &plt, opt.dir_out.join(format!("bank-{:02}.png", i)))?;
        save_chunk(bank, opt.dir_out.join(format!("bank-{:02}.chr", i)))?;
    }

    Ok(())
}
