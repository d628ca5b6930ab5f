//! Preset music resolution against a synthesized assets root.
//! Skipped when ffmpeg/ffprobe (or the mp3 encoder) are unavailable.

use std::process::Command;

use syncmotion::{AudioInput, MusicLibrary, resolve};

fn ffmpeg_tools_available() -> bool {
    ["ffmpeg", "ffprobe"].iter().all(|tool| {
        Command::new(tool)
            .arg("-version")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    })
}

#[test]
fn preset_choice_resolves_to_the_bundled_path_with_probed_duration() {
    if !ffmpeg_tools_available() {
        return;
    }
    let root = std::env::temp_dir().join(format!(
        "syncmotion_presets_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(root.join("music")).unwrap();

    let calm = root.join("music/calm.mp3");
    let status = Command::new("ffmpeg")
        .args([
            "-v",
            "error",
            "-y",
            "-f",
            "lavfi",
            "-i",
            "sine=frequency=440:sample_rate=44100",
            "-t",
            "1",
            "-c:a",
            "libmp3lame",
        ])
        .arg(&calm)
        .status()
        .unwrap();
    if !status.success() {
        // No mp3 encoder in this ffmpeg build.
        return;
    }

    let lib = MusicLibrary::builtin(&root);
    let resolved = resolve(None, Some("Calm Beat"), &lib).unwrap();
    let AudioInput::Encoded { path } = &resolved.input else {
        panic!("preset must resolve to its encoded file");
    };
    assert_eq!(path, &calm);
    // mp3 framing pads slightly; allow generous slack around 1s.
    assert!(
        (resolved.duration_secs - 1.0).abs() < 0.2,
        "duration {}",
        resolved.duration_secs
    );

    std::fs::remove_dir_all(&root).unwrap();
}
