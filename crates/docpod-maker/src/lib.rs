//! Document-to-podcast glue around the `docpod-speech` dispatch layer.
//!
//! A run goes through four stages:
//!
//! 1. [`preprocessing`]: load a PDF, DOCX, HTML, Markdown or text document
//!    (or a URL) and clean it down to plain prose.
//! 2. [`generation`]: stream a two-or-more speaker script out of a chat model.
//! 3. [`script`]: split the script into speaker turns.
//! 4. [`podcast`]: synthesize each turn with the speaker's voice and stack the
//!    segments into one WAV file.
//!
//! ```rust,no_run
//! use docpod_maker::{PodcastMaker, parse_script};
//! # fn run(facade: docpod_speech::TtsFacade) -> docpod_maker::Result<()> {
//! let mut maker = PodcastMaker::new();
//! maker.add_speaker(1, facade.clone(), "Laura's voice is exciting and fast.");
//! maker.add_speaker(2, facade, "Jon's voice is calm.");
//!
//! let turns = parse_script("\"Speaker 1\": \"Welcome!\",\n\"Speaker 2\": \"Hi!\"");
//! maker.synthesize_script(&turns)?.write_wav("podcast.wav")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod podcast;
pub mod preprocessing;
pub mod script;

pub use config::{DEFAULT_PROMPT, PodcastConfig, Speaker, default_speakers, render_prompt};
pub use error::{PodcastError, Result};
pub use generation::{
    OpenAiCompatibleConfig, OpenAiCompatibleGenerator, ScriptAccumulator, TextGenerator,
    TextStream, generate_script, truncate_to_context,
};
pub use podcast::{
    Podcast, PodcastMaker, SpeakerVoice, stack_segments, write_podcast, write_script,
};
pub use preprocessing::{DocumentFormat, LoadedDocument, load_document};
pub use script::{ScriptTurn, parse_script, parse_script_line};
