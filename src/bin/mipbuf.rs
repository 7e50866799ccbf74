use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use mipbuf::{
    ImageExt, MipGenOpts, RenderTarget, RtFormat, SandboxConfig, TargetIdAllocator,
    mips_from_dimensions,
};

#[derive(Parser, Debug)]
#[command(name = "mipbuf", version)]
struct Cli {
    /// Log structural operations at debug level.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the size and mip chain of an image loaded as a render target.
    Info(InfoArgs),
    /// Build the full mip chain of an image and save every level.
    Mips(MipsArgs),
    /// Print a wrap-addressed bilinear sample.
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct SandboxArgs {
    /// Directory used as both load and save root.
    #[arg(long, conflicts_with = "config", required_unless_present = "config")]
    root: Option<PathBuf>,

    /// JSON file with `load_root` and `save_root`.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl SandboxArgs {
    fn resolve(&self) -> anyhow::Result<SandboxConfig> {
        match (&self.config, &self.root) {
            (Some(path), _) => SandboxConfig::from_path(path)
                .with_context(|| format!("load sandbox config '{}'", path.display())),
            (None, Some(root)) => Ok(SandboxConfig {
                load_root: root.clone(),
                save_root: root.clone(),
            }),
            (None, None) => anyhow::bail!("either --root or --config is required"),
        }
    }
}

#[derive(Args, Debug)]
struct InfoArgs {
    #[command(flatten)]
    sandbox: SandboxArgs,

    /// Input image, relative to the load root.
    #[arg(long = "in")]
    in_path: String,

    /// Render target format (r8, rg88, rgb888, rf, rgff, rgbfff).
    #[arg(long, default_value_t = RtFormat::RGB888)]
    format: RtFormat,
}

#[derive(Args, Debug)]
struct MipsArgs {
    #[command(flatten)]
    sandbox: SandboxArgs,

    /// Input image, relative to the load root.
    #[arg(long = "in")]
    in_path: String,

    /// Output name relative to the save root; level `k` is written as `<out>_mip<k>`.
    #[arg(long)]
    out: String,

    /// Render target format (r8, rg88, rgb888, rf, rgff, rgbfff).
    #[arg(long, default_value_t = RtFormat::RGB888)]
    format: RtFormat,

    /// Enable row-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    sandbox: SandboxArgs,

    /// Input image, relative to the load root.
    #[arg(long = "in")]
    in_path: String,

    /// Render target format (r8, rg88, rgb888, rf, rgff, rgbfff).
    #[arg(long, default_value_t = RtFormat::RGB888)]
    format: RtFormat,

    /// Horizontal coordinate; wraps outside [0, 1).
    #[arg(long, allow_negative_numbers = true)]
    u: f32,

    /// Vertical coordinate; wraps outside [0, 1).
    #[arg(long, allow_negative_numbers = true)]
    v: f32,

    /// Mip level to sample.
    #[arg(long, default_value_t = 0)]
    mip: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let ids = TargetIdAllocator::new();
    match cli.cmd {
        Command::Info(args) => cmd_info(args, &ids),
        Command::Mips(args) => cmd_mips(args, &ids),
        Command::Sample(args) => cmd_sample(args, &ids),
    }
}

fn load_target(
    cfg: &SandboxConfig,
    in_path: &str,
    format: RtFormat,
    generate_mips: bool,
    ids: &TargetIdAllocator,
) -> anyhow::Result<RenderTarget> {
    let mut rt = RenderTarget::new(1, 1, format, 1)?.with_id(ids.issue());
    rt.load(&cfg.load_sandbox(), in_path, generate_mips)
        .with_context(|| format!("load '{in_path}' as {format}"))?;
    Ok(rt)
}

fn cmd_info(args: InfoArgs, ids: &TargetIdAllocator) -> anyhow::Result<()> {
    let cfg = args.sandbox.resolve()?;
    let rt = load_target(&cfg, &args.in_path, args.format, true, ids)?;

    println!(
        "{}: {}x{} {}, {} mips, {} bytes",
        args.in_path,
        rt.width(),
        rt.height(),
        rt.format(),
        rt.mip_count(),
        rt.size()
    );
    for mip in 0..rt.mip_count() {
        if let (Some(dims), Some(offset)) = (rt.mip_dims(mip), rt.layout().offset(mip)) {
            println!(
                "  mip {mip}: {}x{} at byte {offset}",
                dims.width, dims.height
            );
        }
    }
    Ok(())
}

fn cmd_mips(args: MipsArgs, ids: &TargetIdAllocator) -> anyhow::Result<()> {
    let cfg = args.sandbox.resolve()?;
    let base = load_target(&cfg, &args.in_path, args.format, false, ids)?;

    let mips = mips_from_dimensions(base.width(), base.height());
    let mut rt =
        RenderTarget::new(base.width(), base.height(), args.format, mips)?.with_id(ids.issue());
    let (Some(dst), Some(src)) = (rt.raw_data_mut(0), base.raw_data(0)) else {
        anyhow::bail!("'{}' produced an empty render target", args.in_path);
    };
    dst.copy_from_slice(src);

    let opts = MipGenOpts {
        parallel: args.parallel,
        threads: args.threads,
    };
    rt.generate_mips_with(&opts)?;

    let save = cfg.save_sandbox();
    for mip in 0..rt.mip_count() {
        let name = level_name(&args.out, mip);
        let written = rt
            .save(&save, &name, mip)
            .with_context(|| format!("save mip {mip} as '{name}'"))?;
        eprintln!("wrote {}", written.display());
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs, ids: &TargetIdAllocator) -> anyhow::Result<()> {
    let cfg = args.sandbox.resolve()?;
    let rt = load_target(&cfg, &args.in_path, args.format, args.mip > 0, ids)?;
    if args.mip >= rt.mip_count() {
        anyhow::bail!(
            "mip {} out of range for a target with {} levels",
            args.mip,
            rt.mip_count()
        );
    }

    let px = rt.sample_bilinear(args.u, args.v, args.mip);
    println!("{} {} {}", px.r, px.g, px.b);
    Ok(())
}

/// `out.png` -> `out_mip2.png`; names without a known extension get `_mip2` appended and the
/// default extension is added by `save`.
fn level_name(out: &str, mip: u8) -> String {
    let path = Path::new(out);
    match (ImageExt::from_path(path), path.extension()) {
        (Some(_), Some(ext)) => {
            let ext = ext.to_string_lossy();
            let stem = &out[..out.len() - ext.len() - 1];
            format!("{stem}_mip{mip}.{ext}")
        }
        _ => format!("{out}_mip{mip}"),
    }
}
