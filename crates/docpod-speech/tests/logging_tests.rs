mod common;

use common::FakePipeline;
use docpod_speech::{
    AuxiliaryArgs, ModelHandle, ModelRegistry, SynthesisOverrides, VoiceProfile, dispatch,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct Capture;

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        LINES.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture;

#[test]
fn dispatch_log_counts_characters_not_bytes() {
    let _ = log::set_logger(&CAPTURE);
    log::set_max_level(LevelFilter::Debug);

    // 9 characters, 12 bytes
    let text = "Grüße, Jürgen".chars().take(9).collect::<String>();
    assert_eq!(text.chars().count(), 9);
    assert_ne!(text.len(), 9);

    let (pipeline, _) = FakePipeline::new(vec![2]);
    let handle = ModelHandle::pipeline(Box::new(pipeline));
    dispatch(
        &ModelRegistry::builtin(),
        "hexgrad/Kokoro-82M",
        &text,
        &handle,
        &VoiceProfile::new("af_heart"),
        &AuxiliaryArgs::new(),
        &SynthesisOverrides::default(),
    )
    .unwrap();

    let lines = LINES.lock().unwrap();
    assert!(
        lines
            .iter()
            .any(|line| line.contains("dispatching 9 characters")),
        "captured: {lines:?}"
    );
}
