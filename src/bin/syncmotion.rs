use std::path::PathBuf;

use clap::{Parser, Subcommand};

use syncmotion::{
    Action, MusicLibrary, RenderPipeline, RenderRequest, UploadedAudio,
    assets::media::decode_audio_f32_stereo, cartoonify, load_image, save_png,
};

#[derive(Parser, Debug)]
#[command(name = "syncmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Animate a photo into an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Apply the cartoon filter to a photo and write a PNG.
    Stylize(StylizeArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input photo (PNG, JPEG, ...).
    #[arg(long)]
    image: PathBuf,

    /// Motion preset: Jump, Run, Hop, Slide or Pulse.
    #[arg(long)]
    action: Action,

    /// Audio file to decode and sync to (wins over --music).
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Preset music name ("Calm Beat", "Upbeat Tune", "Cinematic").
    #[arg(long)]
    music: Option<String>,

    /// Cartoonify the photo before animating.
    #[arg(long, default_value_t = false)]
    cartoon: bool,

    /// Directory holding the bundled music/ presets.
    #[arg(long, default_value = "assets")]
    assets_root: PathBuf,

    /// Directory to write the output MP4 into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct StylizeArgs {
    /// Input photo (PNG, JPEG, ...).
    #[arg(long)]
    image: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Stylize(args) => cmd_stylize(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let image = load_image(&args.image)?;

    // A file passed with --audio goes through the resolver's upload branch,
    // the same as a waveform uploaded through a form.
    let audio = match &args.audio {
        Some(path) => {
            let pcm = decode_audio_f32_stereo(path, 48_000)?;
            Some(UploadedAudio {
                sample_rate: pcm.sample_rate,
                channels: pcm.channels,
                samples: pcm.interleaved_f32,
            })
        }
        None => None,
    };

    let pipeline = RenderPipeline::new(MusicLibrary::builtin(&args.assets_root), &args.out_dir);
    let video = pipeline.render(&RenderRequest {
        image,
        audio,
        music_choice: args.music,
        action: args.action,
        cartoon: args.cartoon,
    })?;

    eprintln!(
        "wrote {} ({} frames, {:.2}s)",
        video.path.display(),
        video.frames,
        video.duration_secs
    );
    Ok(())
}

fn cmd_stylize(args: StylizeArgs) -> anyhow::Result<()> {
    let image = load_image(&args.image)?;
    let out = cartoonify(&image)?;
    save_png(&out, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
