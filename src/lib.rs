//! # clip_token_count: CLIP prompt token counting for text-to-image pipelines
//!
//! Picks a tokenizer backend and checkpoint, and hands back a counter that maps one or
//! more prompts to their token counts. Nothing is truncated and nothing is padded; the
//! counts exclude the start/end special tokens the CLIP vocabulary always adds.
//!
//! ## Backends
//!
//! * [`ClipImplementation::HuggingFace`] builds the CLIP BPE tokenizer for the chosen
//!   [`ClipCheckpoint`] from files on the Hugging Face Hub. Counts are the encoded length
//!   minus the two special tokens and are never clamped, so they can exceed the 75 usable
//!   tokens of the text encoder.
//! * [`ClipImplementation::OpenClip`] uses the bundled OpenAI CLIP vocabulary. Counts are
//!   raw BPE lengths clamped to [`MAX_NONSPECIAL_TOKENS`].
//!
//! ## Use
//!
//! ```no_run
//! use clip_token_count::*;
//!
//! let counter = get_token_counter(ClipImplementation::OpenClip, ClipCheckpoint::OpenAi)?;
//!
//! let counts = counter.count_tokens_cpu("a photo of an astronaut riding a horse".into())?;
//! assert_eq!(counts.len(), 1);
//!
//! let counts = counter.count_tokens(["a cat", "a dog on a skateboard"].into(), Device::Cuda(0))?;
//! assert_eq!(counts.device(), Device::Cuda(0));
//! # Ok::<(), clip_token_count::TokenCountError>(())
//! ```
//!
//! Selectors can also come from configuration. Unknown names fail before any tokenizer is
//! built:
//!
//! ```no_run
//! use clip_token_count::*;
//!
//! let err = get_token_counter_from_names("hf", "sdxl").unwrap_err();
//! assert!(matches!(err, TokenCountError::UnknownCheckpoint(name) if name == "sdxl"));
//! ```

// Internal modules
mod counter;
mod device;
mod error;
mod hf_loader;
mod logging;
mod prompts;
mod selectors;
mod tokenizer;

// Internal imports
#[allow(unused_imports)]
use tracing::{debug, error, info, span, trace, warn, Level};

// Public exports
pub use self::{
    counter::{
        get_token_counter, get_token_counter_from_names, get_token_counter_with_loader,
        hf::{HfTokenCounter, PretrainedTokenizer, SPECIAL_TOKEN_OFFSET},
        open_clip::{
            BundledClipEncoder, ClipEncoder, OpenClipTokenCounter, CONTEXT_LENGTH,
            MAX_NONSPECIAL_TOKENS, SPECIAL_TOKEN_COUNT,
        },
        CountTokens, TokenCounts,
    },
    device::Device,
    error::{Result, TokenCountError},
    hf_loader::{HfLoaderConfig, HuggingFaceLoader, DEFAULT_ENV_VAR},
    logging::{LoggingConfig, LoggingConfigTrait},
    prompts::Prompts,
    selectors::{ClipCheckpoint, ClipImplementation, PretrainedSource},
    tokenizer::get_hf_tokenizer,
};
