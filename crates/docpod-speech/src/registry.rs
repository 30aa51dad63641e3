//! Model registry: identifier -> family (constructor + synthesizer).
//!
//! A registry is an ordinary value. Build it once at startup and hand it to
//! [`load_tts_model`](crate::load_tts_model); there is no process-wide table.

use crate::adapters::{Constructor, ModelFamily, Synthesizer};
use crate::error::{TTSError, TTSResult};
use std::collections::BTreeMap;

/// Identifiers served out of the box.
const BUILTIN_MODELS: &[(&str, ModelFamily)] = &[
    (
        "OuteAI/OuteTTS-0.1-350M-GGUF/OuteTTS-0.1-350M-FP16.gguf",
        ModelFamily::GgufInterface,
    ),
    (
        "OuteAI/OuteTTS-0.2-500M-GGUF/OuteTTS-0.2-500M-FP16.gguf",
        ModelFamily::GgufInterface,
    ),
    ("suno/bark", ModelFamily::ProcessorConditioned),
    ("suno/bark-small", ModelFamily::ProcessorConditioned),
    (
        "parler-tts/parler-tts-large-v1",
        ModelFamily::DiffusionTransformer,
    ),
    (
        "parler-tts/parler-tts-mini-v1",
        ModelFamily::DiffusionTransformer,
    ),
    (
        "parler-tts/parler-tts-mini-v1.1",
        ModelFamily::DiffusionTransformer,
    ),
    (
        "parler-tts/parler-tts-mini-multilingual-v1.1",
        ModelFamily::DiffusionTransformerMultilingual,
    ),
    (
        "ai4bharat/indic-parler-tts",
        ModelFamily::DiffusionTransformerMultilingual,
    ),
    ("hexgrad/Kokoro-82M", ModelFamily::StreamingPipeline),
];

/// A registered model identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    model_id: String,
    family: ModelFamily,
}

impl RegistryEntry {
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    pub fn constructor(&self) -> Constructor {
        self.family.constructor()
    }

    pub fn synthesizer(&self) -> Synthesizer {
        self.family.synthesizer()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl ModelRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in identifiers.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_MODELS)
            .expect("built-in model table holds unique, well-formed identifiers")
    }

    /// Registry built by registering each `(model_id, family)` pair in order.
    pub fn from_entries(entries: &[(&str, ModelFamily)]) -> TTSResult<Self> {
        let mut registry = Self::new();
        for (model_id, family) in entries {
            registry.register(*model_id, *family)?;
        }
        Ok(registry)
    }

    /// Register `model_id` for `family`.
    ///
    /// Fails when the identifier does not fit the family or is already
    /// registered; an existing entry is never replaced.
    pub fn register(&mut self, model_id: impl Into<String>, family: ModelFamily) -> TTSResult<()> {
        let model_id = model_id.into();
        family.validate_identifier(&model_id)?;

        if let Some(existing) = self.entries.get(&model_id) {
            return Err(TTSError::DuplicateModel(
                model_id,
                existing.family.to_string(),
            ));
        }

        self.entries
            .insert(model_id.clone(), RegistryEntry { model_id, family });
        Ok(())
    }

    /// Look up the entry for `model_id`.
    pub fn resolve(&self, model_id: &str) -> TTSResult<&RegistryEntry> {
        self.entries.get(model_id).ok_or_else(|| {
            TTSError::UnsupportedModel(model_id.to_string(), self.model_ids().join(", "))
        })
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.entries.contains_key(model_id)
    }

    pub fn model_ids(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_entries_pass_registration_rules() {
        let mut registry = ModelRegistry::new();
        for (model_id, family) in BUILTIN_MODELS {
            registry.register(*model_id, *family).unwrap();
        }
        assert_eq!(registry.len(), ModelRegistry::builtin().len());
    }

    #[test]
    fn from_entries_rejects_duplicate_rows() {
        let err = ModelRegistry::from_entries(&[
            ("suno/bark", ModelFamily::ProcessorConditioned),
            ("suno/bark", ModelFamily::DiffusionTransformer),
        ])
        .unwrap_err();
        match err {
            TTSError::DuplicateModel(id, existing) => {
                assert_eq!(id, "suno/bark");
                assert_eq!(existing, "processor-conditioned");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_entries_rejects_malformed_rows() {
        let err = ModelRegistry::from_entries(&[("bark", ModelFamily::ProcessorConditioned)])
            .unwrap_err();
        assert!(matches!(err, TTSError::InvalidModelIdentifier(_, _)));
    }

    #[test]
    fn resolve_returns_family_pair_for_every_entry() {
        let registry = ModelRegistry::builtin();
        for entry in registry.entries() {
            let resolved = registry.resolve(entry.model_id()).unwrap();
            assert_eq!(resolved.model_id(), entry.model_id());
            assert_eq!(resolved.family(), entry.family());
            let (_constructor, _synthesizer) = (resolved.constructor(), resolved.synthesizer());
        }
    }

    #[test]
    fn resolve_unknown_is_unsupported() {
        let registry = ModelRegistry::builtin();
        for unknown in ["", "suno/bark-large", "parler-tts/parler-tts-mini-v1 "] {
            match registry.resolve(unknown) {
                Err(TTSError::UnsupportedModel(id, available)) => {
                    assert_eq!(id, unknown);
                    assert!(available.contains("suno/bark"));
                }
                other => panic!("Unexpected result for {unknown:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn duplicate_registration_fails_and_keeps_first() {
        let mut registry = ModelRegistry::new();
        registry
            .register("acme/voice", ModelFamily::DiffusionTransformer)
            .unwrap();

        let err = registry
            .register("acme/voice", ModelFamily::ProcessorConditioned)
            .unwrap_err();
        match err {
            TTSError::DuplicateModel(id, existing) => {
                assert_eq!(id, "acme/voice");
                assert_eq!(existing, "diffusion-transformer");
            }
            other => panic!("Unexpected error: {other:?}"),
        }

        assert_eq!(
            registry.resolve("acme/voice").unwrap().family(),
            ModelFamily::DiffusionTransformer
        );
    }

    #[test]
    fn registration_validates_identifier_shape() {
        let mut registry = ModelRegistry::new();
        let err = registry
            .register("acme/voice", ModelFamily::GgufInterface)
            .unwrap_err();
        assert!(matches!(err, TTSError::InvalidModelIdentifier(_, _)));
        assert!(registry.is_empty());
    }

    #[test]
    fn builtin_keeps_documented_identifiers() {
        let registry = ModelRegistry::builtin();
        assert_eq!(
            registry.resolve("suno/bark").unwrap().family(),
            ModelFamily::ProcessorConditioned
        );
        assert_eq!(
            registry
                .resolve("parler-tts/parler-tts-mini-v1")
                .unwrap()
                .family(),
            ModelFamily::DiffusionTransformer
        );
        assert_eq!(
            registry
                .resolve("OuteAI/OuteTTS-0.2-500M-GGUF/OuteTTS-0.2-500M-FP16.gguf")
                .unwrap()
                .family(),
            ModelFamily::GgufInterface
        );
    }
}
