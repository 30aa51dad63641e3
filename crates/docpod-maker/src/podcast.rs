//! Turn-by-turn synthesis and assembly of the final podcast audio.

use crate::config::PodcastConfig;
use crate::error::{PodcastError, Result};
use crate::script::ScriptTurn;
use docpod_speech::{TtsFacade, VoiceProfile, Waveform};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub const AUDIO_FILE_NAME: &str = "podcast.wav";
pub const SCRIPT_FILE_NAME: &str = "podcast.txt";

/// A speaker's model and the voice profile passed to it.
#[derive(Debug, Clone)]
pub struct SpeakerVoice {
    pub facade: TtsFacade,
    pub voice_profile: VoiceProfile,
}

/// Assembled mono podcast audio.
#[derive(Debug, Clone, PartialEq)]
pub struct Podcast {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Podcast {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Write 32-bit float mono WAV.
    pub fn write_wav(&self, path: impl AsRef<Path>) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(PodcastError::EmptyPodcast);
        }
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }
}

/// Concatenate segments with `gap_secs` of silence between consecutive ones.
///
/// All segments must share one sample rate; an empty list is an error.
pub fn stack_segments(segments: &[Waveform], gap_secs: f32) -> Result<Podcast> {
    let Some(first) = segments.first() else {
        return Err(PodcastError::EmptyPodcast);
    };
    let sample_rate = first.sample_rate;
    if let Some(other) = segments.iter().find(|s| s.sample_rate != sample_rate) {
        return Err(PodcastError::SampleRateMismatch {
            expected: sample_rate,
            found: other.sample_rate,
        });
    }

    let gap = (gap_secs.max(0.0) * sample_rate as f32).round() as usize;
    let total = segments.iter().map(Waveform::len).sum::<usize>() + gap * (segments.len() - 1);
    let mut samples = Vec::with_capacity(total);
    for (index, segment) in segments.iter().enumerate() {
        if index > 0 {
            samples.resize(samples.len() + gap, 0.0);
        }
        samples.extend(segment.samples.iter().copied());
    }
    Ok(Podcast {
        samples,
        sample_rate,
    })
}

/// Maps speaker ids to voices and synthesizes a parsed script.
#[derive(Debug, Clone)]
pub struct PodcastMaker {
    voices: BTreeMap<u32, SpeakerVoice>,
    silence_gap_secs: f32,
}

impl Default for PodcastMaker {
    fn default() -> Self {
        Self::new()
    }
}

impl PodcastMaker {
    pub fn new() -> Self {
        Self {
            voices: BTreeMap::new(),
            silence_gap_secs: 0.5,
        }
    }

    /// Every configured speaker gets `facade` with their tone as voice profile.
    pub fn from_config(config: &PodcastConfig, facade: &TtsFacade) -> Self {
        let mut maker = Self::new().with_silence_gap(config.silence_gap_secs);
        for speaker in &config.speakers {
            maker.add_speaker(speaker.id, facade.clone(), speaker.tone.as_str());
        }
        maker
    }

    pub fn with_silence_gap(mut self, gap_secs: f32) -> Self {
        self.silence_gap_secs = gap_secs;
        self
    }

    pub fn add_speaker(
        &mut self,
        speaker_id: u32,
        facade: TtsFacade,
        voice_profile: impl Into<VoiceProfile>,
    ) {
        self.voices.insert(
            speaker_id,
            SpeakerVoice {
                facade,
                voice_profile: voice_profile.into(),
            },
        );
    }

    pub fn voice(&self, speaker_id: u32) -> Option<&SpeakerVoice> {
        self.voices.get(&speaker_id)
    }

    /// Synthesize every turn in order and stack the results.
    ///
    /// Turns of unknown speakers are skipped. After a speaker's first
    /// synthesis failure their remaining turns are skipped too.
    pub fn synthesize_script(&self, turns: &[ScriptTurn]) -> Result<Podcast> {
        let mut segments = Vec::with_capacity(turns.len());
        let mut halted = BTreeSet::new();

        for (index, turn) in turns.iter().enumerate() {
            if halted.contains(&turn.speaker_id) {
                continue;
            }
            let Some(voice) = self.voices.get(&turn.speaker_id) else {
                log::warn!(
                    "Turn {}: no voice for Speaker {}, skipping",
                    index + 1,
                    turn.speaker_id
                );
                continue;
            };

            log::info!("Speaker {}: {}", turn.speaker_id, turn.text);
            match voice.facade.synthesize(&turn.text, &voice.voice_profile) {
                Ok(waveform) => segments.push(waveform),
                Err(e) => {
                    log::warn!(
                        "Speaker {} failed on turn {} ({e}); skipping their remaining turns",
                        turn.speaker_id,
                        index + 1
                    );
                    halted.insert(turn.speaker_id);
                }
            }
        }

        log::debug!("Synthesized {} of {} turns", segments.len(), turns.len());
        stack_segments(&segments, self.silence_gap_secs)
    }
}

/// Write the generated script to `podcast.txt` under `output_folder`.
pub fn write_script(output_folder: impl AsRef<Path>, script: &str) -> Result<PathBuf> {
    let output_folder = output_folder.as_ref();
    std::fs::create_dir_all(output_folder)?;
    let path = output_folder.join(SCRIPT_FILE_NAME);
    std::fs::write(&path, script)?;
    Ok(path)
}

/// Write `podcast` to `podcast.wav` under `output_folder`.
pub fn write_podcast(output_folder: impl AsRef<Path>, podcast: &Podcast) -> Result<PathBuf> {
    let output_folder = output_folder.as_ref();
    std::fs::create_dir_all(output_folder)?;
    let path = output_folder.join(AUDIO_FILE_NAME);
    podcast.write_wav(&path)?;
    Ok(path)
}
