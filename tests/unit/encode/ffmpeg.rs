use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(
        std::env::temp_dir().join("beatline_odd.mp4"),
    ));
    let err = sink.begin(cfg(31, 20)).unwrap_err();
    assert!(matches!(err, BeatlineError::Render(_)));
    assert!(sink.begin(cfg(0, 20)).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn codecs_pick_their_muxer() {
    assert_eq!(VideoCodec::H264Mp4.muxer(), "mp4");
    assert_eq!(VideoCodec::Vp9Webm.muxer(), "webm");
}

#[test]
fn partial_file_sits_next_to_the_output() {
    let sink = FfmpegSink::new(FfmpegSinkOpts::new("out/PRBoxScene.webm"));
    assert_eq!(sink.partial, PathBuf::from("out/PRBoxScene.webm.partial"));
}
