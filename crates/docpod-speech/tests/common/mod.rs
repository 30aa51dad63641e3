#![allow(dead_code)]

use docpod_speech::backend::ChunkIter;
use docpod_speech::{
    ConditionalGenerationModel, GgufGenerationParams, GgufInterface, LoadOptions, ModelBackend,
    ModelOutput, ProcessedInputs, ProcessorConditionedModel, SpeakerPreset, SpeechPipeline,
    SpeechProcessor, TTSError, TTSResult, TextTokenizer,
};
use ndarray::{ArrayD, IxDyn};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub type Log<T> = Arc<Mutex<Vec<T>>>;

pub fn log<T>() -> Log<T> {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries<T: Clone>(log: &Log<T>) -> Vec<T> {
    log.lock().unwrap().clone()
}

pub fn tensor(shape: &[usize]) -> ArrayD<f32> {
    let len = shape.iter().product();
    ArrayD::from_shape_vec(IxDyn(shape), (0..len).map(|v| v as f32 * 0.01).collect()).unwrap()
}

/// Tokenizer returning `[tag, chars]` and remembering every input.
pub struct RecordingTokenizer {
    pub tag: u32,
    pub calls: Log<String>,
}

impl RecordingTokenizer {
    pub fn new(tag: u32) -> (Arc<Self>, Log<String>) {
        let calls = log();
        let tokenizer = Arc::new(Self {
            tag,
            calls: Arc::clone(&calls),
        });
        (tokenizer, calls)
    }
}

impl TextTokenizer for RecordingTokenizer {
    fn encode(&self, text: &str) -> TTSResult<Vec<u32>> {
        self.calls.lock().unwrap().push(text.to_string());
        Ok(vec![self.tag, text.chars().count() as u32])
    }
}

pub struct FakeConditional {
    pub sample_rate: u32,
    pub encoder_id: Option<String>,
    pub output_shape: Vec<usize>,
    pub calls: Log<(Vec<u32>, Vec<u32>)>,
}

impl FakeConditional {
    pub fn new(sample_rate: u32) -> (Self, Log<(Vec<u32>, Vec<u32>)>) {
        let calls = log();
        let model = Self {
            sample_rate,
            encoder_id: None,
            output_shape: vec![1, 480],
            calls: Arc::clone(&calls),
        };
        (model, calls)
    }
}

impl ConditionalGenerationModel for FakeConditional {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn description_encoder_id(&self) -> Option<String> {
        self.encoder_id.clone()
    }

    fn generate(&mut self, input_ids: &[u32], prompt_input_ids: &[u32]) -> TTSResult<ArrayD<f32>> {
        self.calls
            .lock()
            .unwrap()
            .push((input_ids.to_vec(), prompt_input_ids.to_vec()));
        Ok(tensor(&self.output_shape))
    }
}

pub struct RecordingProcessor {
    pub calls: Log<(String, String)>,
}

impl SpeechProcessor for RecordingProcessor {
    fn process(&self, text: &str, voice_preset: &str) -> TTSResult<ProcessedInputs> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice_preset.to_string()));
        Ok(ProcessedInputs {
            input_ids: vec![7, 8, 9],
            attention_mask: vec![1, 1, 1],
            voice_preset: Some(voice_preset.to_string()),
        })
    }
}

pub struct FakeBark {
    pub sample_rate: u32,
    pub calls: Log<ProcessedInputs>,
}

impl ProcessorConditionedModel for FakeBark {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn generate(&mut self, inputs: &ProcessedInputs) -> TTSResult<ArrayD<f32>> {
        self.calls.lock().unwrap().push(inputs.clone());
        Ok(tensor(&[1, 320]))
    }
}

pub struct FakeGguf {
    pub sample_rate: u32,
    pub calls: Log<(String, String, GgufGenerationParams)>,
}

impl GgufInterface for FakeGguf {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn load_default_speaker(&self, name: &str) -> TTSResult<SpeakerPreset> {
        if name.starts_with("unknown") {
            return Err(TTSError::VoiceNotFound(
                name.to_string(),
                "gguf".to_string(),
                "no such preset".to_string(),
            ));
        }
        Ok(SpeakerPreset {
            name: name.to_string(),
            data: serde_json::json!({ "name": name }),
        })
    }

    fn generate(
        &mut self,
        text: &str,
        speaker: &SpeakerPreset,
        params: &GgufGenerationParams,
    ) -> TTSResult<ModelOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), speaker.name.clone(), *params));
        Ok(ModelOutput {
            audio: tensor(&[1, 1, 240]),
        })
    }
}

pub struct FakePipeline {
    pub sample_rate: u32,
    pub chunk_lengths: Vec<usize>,
    pub fail_at: Option<usize>,
    pub calls: Log<(String, String)>,
}

impl FakePipeline {
    pub fn new(chunk_lengths: Vec<usize>) -> (Self, Log<(String, String)>) {
        let calls = log();
        let pipeline = Self {
            sample_rate: 24_000,
            chunk_lengths,
            fail_at: None,
            calls: Arc::clone(&calls),
        };
        (pipeline, calls)
    }
}

impl SpeechPipeline for FakePipeline {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn run<'a>(&'a mut self, text: &str, voice: &str) -> TTSResult<ChunkIter<'a>> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice.to_string()));
        let fail_at = self.fail_at;
        let chunks = self
            .chunk_lengths
            .iter()
            .enumerate()
            .map(move |(index, len)| {
                if Some(index) == fail_at {
                    Err(TTSError::GenerationFailed(
                        "chunk failed".to_string(),
                        0,
                        "af_heart".to_string(),
                    ))
                } else {
                    Ok(ArrayD::from_elem(IxDyn(&[*len]), index as f32))
                }
            });
        Ok(Box::new(chunks))
    }
}

/// Backend serving every family with fakes and recording what it was asked for.
pub struct FakeBackend {
    pub sample_rate: u32,
    pub encoder_id: Option<String>,
    pub resolved: Log<(String, String)>,
    pub tokenizer_loads: Log<String>,
    pub tokenizer_calls: Log<String>,
    pub generate_calls: Log<(Vec<u32>, Vec<u32>)>,
    pub processor_calls: Log<(String, String)>,
    pub gguf_calls: Log<(String, String, GgufGenerationParams)>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            sample_rate: 24_000,
            encoder_id: None,
            resolved: log(),
            tokenizer_loads: log(),
            tokenizer_calls: log(),
            generate_calls: log(),
            processor_calls: log(),
            gguf_calls: log(),
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }
}

impl ModelBackend for FakeBackend {
    fn resolve_model_file(
        &self,
        repo_id: &str,
        filename: &str,
        _options: &LoadOptions,
    ) -> TTSResult<PathBuf> {
        self.resolved
            .lock()
            .unwrap()
            .push((repo_id.to_string(), filename.to_string()));
        Ok(PathBuf::from("/models").join(repo_id).join(filename))
    }

    fn load_gguf_interface(
        &self,
        _model_id: &str,
        _model_path: PathBuf,
        _options: &LoadOptions,
    ) -> TTSResult<Box<dyn GgufInterface>> {
        Ok(Box::new(FakeGguf {
            sample_rate: self.sample_rate,
            calls: Arc::clone(&self.gguf_calls),
        }))
    }

    fn load_conditional_generation(
        &self,
        _model_id: &str,
        _options: &LoadOptions,
    ) -> TTSResult<Box<dyn ConditionalGenerationModel>> {
        Ok(Box::new(FakeConditional {
            sample_rate: self.sample_rate,
            encoder_id: self.encoder_id.clone(),
            output_shape: vec![1, 480],
            calls: Arc::clone(&self.generate_calls),
        }))
    }

    fn load_processor_model(
        &self,
        _model_id: &str,
        _options: &LoadOptions,
    ) -> TTSResult<Box<dyn ProcessorConditionedModel>> {
        Ok(Box::new(FakeBark {
            sample_rate: self.sample_rate,
            calls: log(),
        }))
    }

    fn load_processor(
        &self,
        _model_id: &str,
        _options: &LoadOptions,
    ) -> TTSResult<Arc<dyn SpeechProcessor>> {
        Ok(Arc::new(RecordingProcessor {
            calls: Arc::clone(&self.processor_calls),
        }))
    }

    fn load_pipeline(
        &self,
        _model_id: &str,
        _options: &LoadOptions,
    ) -> TTSResult<Box<dyn SpeechPipeline>> {
        let (mut pipeline, _) = FakePipeline::new(vec![100, 100, 40]);
        pipeline.sample_rate = self.sample_rate;
        Ok(Box::new(pipeline))
    }

    fn load_tokenizer(
        &self,
        tokenizer_id: &str,
        _options: &LoadOptions,
    ) -> TTSResult<Arc<dyn TextTokenizer>> {
        self.tokenizer_loads
            .lock()
            .unwrap()
            .push(tokenizer_id.to_string());
        let tag = self.tokenizer_loads.lock().unwrap().len() as u32;
        Ok(Arc::new(RecordingTokenizer {
            tag,
            calls: Arc::clone(&self.tokenizer_calls),
        }))
    }
}
