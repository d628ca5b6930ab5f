use syncmotion::{
    Action, AudioInput, FrameRgb, InMemorySink, MusicLibrary, RenderPipeline, RenderRequest,
    SyncError, UploadedAudio,
};

fn test_image(w: u32, h: u32) -> FrameRgb {
    let mut data = Vec::with_capacity((w * h * 3) as usize);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[(x * 9 % 256) as u8, (y * 11 % 256) as u8, 64]);
        }
    }
    FrameRgb::from_raw(w, h, data).unwrap()
}

fn upload_secs(secs: f64) -> UploadedAudio {
    let rate = 22_050u32;
    let n = (f64::from(rate) * secs) as usize;
    UploadedAudio {
        sample_rate: rate,
        channels: 1,
        samples: (0..n).map(|i| (i as f32 * 0.02).sin() * 0.4).collect(),
    }
}

fn pipeline() -> RenderPipeline {
    let out_dir = std::env::temp_dir().join(format!(
        "syncmotion_pipeline_test_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    RenderPipeline::new(MusicLibrary::builtin("assets"), out_dir)
}

#[test]
fn two_seconds_of_audio_at_15fps_yields_30_frames() {
    let pipe = pipeline();
    let req = RenderRequest {
        image: test_image(32, 24),
        audio: Some(upload_secs(2.0)),
        music_choice: Some("None".to_string()),
        action: Action::Slide,
        cartoon: false,
    };

    let mut sink = InMemorySink::new();
    let stats = pipe.render_into(&req, &mut sink).unwrap();
    assert_eq!(stats.frames, 30);
    assert!((stats.duration_secs - 2.0).abs() < 1e-9);
    assert_eq!(sink.frames().len(), 30);

    // Frame indices arrive in strictly increasing order, all input-sized.
    for (i, (idx, frame)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert_eq!((frame.width, frame.height), (32, 24));
    }

    let cfg = sink.config().unwrap();
    assert!(matches!(
        cfg.audio,
        Some(AudioInput::RawPcm {
            sample_rate: 22_050,
            channels: 1,
            ..
        })
    ));
}

#[test]
fn no_audio_source_fails_with_input_error_and_writes_nothing() {
    let out_dir = std::env::temp_dir().join(format!(
        "syncmotion_no_audio_test_{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&out_dir).unwrap();
    let pipe = RenderPipeline::new(MusicLibrary::builtin("assets"), &out_dir);

    let req = RenderRequest {
        image: test_image(16, 16),
        audio: None,
        music_choice: Some("None".to_string()),
        action: Action::Jump,
        cartoon: false,
    };
    let err = pipe.render(&req).unwrap_err();
    assert!(matches!(err, SyncError::Input(_)));
    assert!(err.to_string().contains("no valid audio provided"));

    let leftovers: Vec<_> = std::fs::read_dir(&out_dir).unwrap().collect();
    assert!(leftovers.is_empty(), "failed render must not leave files");
    std::fs::remove_dir_all(&out_dir).unwrap();
}

#[test]
fn sub_frame_audio_duration_is_an_empty_result_error() {
    let pipe = pipeline();
    let req = RenderRequest {
        image: test_image(16, 16),
        // 0.01s at 15fps floors to zero frames.
        audio: Some(upload_secs(0.01)),
        music_choice: None,
        action: Action::Hop,
        cartoon: false,
    };
    let mut sink = InMemorySink::new();
    let err = pipe.render_into(&req, &mut sink).unwrap_err();
    assert!(matches!(err, SyncError::EmptyResult(_)));
    assert!(sink.config().is_none(), "sink must not be started");
}

#[test]
fn cartoon_flag_changes_the_rendered_frames() {
    let pipe = pipeline();
    let base = RenderRequest {
        image: test_image(24, 24),
        audio: Some(upload_secs(0.5)),
        music_choice: None,
        action: Action::Pulse,
        cartoon: false,
    };
    let toon = RenderRequest {
        cartoon: true,
        ..base.clone()
    };

    let mut plain_sink = InMemorySink::new();
    pipe.render_into(&base, &mut plain_sink).unwrap();
    let mut toon_sink = InMemorySink::new();
    pipe.render_into(&toon, &mut toon_sink).unwrap();

    assert_eq!(plain_sink.frames().len(), toon_sink.frames().len());
    assert_ne!(
        plain_sink.frames()[0].1.data,
        toon_sink.frames()[0].1.data
    );
}

#[test]
fn every_action_renders_the_same_frame_count() {
    let pipe = pipeline();
    for action in Action::ALL {
        let req = RenderRequest {
            image: test_image(20, 14),
            audio: Some(upload_secs(1.0)),
            music_choice: None,
            action,
            cartoon: false,
        };
        let mut sink = InMemorySink::new();
        let stats = pipe.render_into(&req, &mut sink).unwrap();
        assert_eq!(stats.frames, 15, "{action}");
    }
}
