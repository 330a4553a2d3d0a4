pub mod hf;
pub mod open_clip;

use std::fmt::Debug;

use derive_more::Deref;
use serde::Serialize;

use crate::{
    device::Device,
    hf_loader::HuggingFaceLoader,
    prompts::Prompts,
    selectors::{ClipCheckpoint, ClipImplementation},
    tokenizer::get_hf_tokenizer,
};
use hf::HfTokenCounter;
use open_clip::{BundledClipEncoder, OpenClipTokenCounter};

/// Counts the usable tokens of prompts without truncating or padding them.
///
/// Implementors hold an already constructed tokenizer and never mutate it, so a counter
/// can be called any number of times. The returned counts line up with the input prompts.
pub trait CountTokens: Send + Sync + Debug {
    /// Counts every prompt and tags the result with `device`.
    ///
    /// A single string yields one count. Errors from the tokenizer library are returned
    /// as they are.
    fn count_tokens(&self, prompts: Prompts<'_>, device: Device) -> crate::Result<TokenCounts>;

    /// [`CountTokens::count_tokens`] with the default [`Device::Cpu`] placement.
    fn count_tokens_cpu(&self, prompts: Prompts<'_>) -> crate::Result<TokenCounts> {
        self.count_tokens(prompts, Device::default())
    }
}

impl CountTokens for Box<dyn CountTokens> {
    fn count_tokens(&self, prompts: Prompts<'_>, device: Device) -> crate::Result<TokenCounts> {
        (**self).count_tokens(prompts, device)
    }
}

/// Per-prompt token counts plus the device they are meant for.
#[derive(Clone, Debug, Deref, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    #[deref]
    counts: Vec<usize>,
    device: Device,
}

impl TokenCounts {
    pub fn new(counts: Vec<usize>, device: Device) -> Self {
        Self { counts, device }
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.counts
    }

    /// Largest count, `None` for an empty batch.
    pub fn max(&self) -> Option<usize> {
        self.counts.iter().copied().max()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl IntoIterator for TokenCounts {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenCounts {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Builds a counter for `implementation`, loading `checkpoint` from the Hugging Face Hub
/// where the backend needs it.
pub fn get_token_counter(
    implementation: ClipImplementation,
    checkpoint: ClipCheckpoint,
) -> crate::Result<Box<dyn CountTokens>> {
    get_token_counter_with_loader(implementation, checkpoint, &HuggingFaceLoader::default())
}

pub fn get_token_counter_with_loader(
    implementation: ClipImplementation,
    checkpoint: ClipCheckpoint,
    loader: &HuggingFaceLoader,
) -> crate::Result<Box<dyn CountTokens>> {
    crate::debug!(%implementation, %checkpoint, "Building token counter");
    match implementation {
        ClipImplementation::HuggingFace => {
            let tokenizer = get_hf_tokenizer(checkpoint, loader)?;
            Ok(Box::new(HfTokenCounter::new(tokenizer)))
        }
        ClipImplementation::OpenClip => {
            // OpenAI and LAION CLIP models share the bundled vocabulary.
            crate::trace!(%checkpoint, "OpenCLIP tokenizer ignores the checkpoint");
            Ok(Box::new(OpenClipTokenCounter::new(BundledClipEncoder::new())))
        }
    }
}

/// Parses both selectors before any tokenizer is constructed, implementation first.
pub fn get_token_counter_from_names(
    implementation: &str,
    checkpoint: &str,
) -> crate::Result<Box<dyn CountTokens>> {
    let implementation: ClipImplementation = implementation.parse()?;
    let checkpoint: ClipCheckpoint = checkpoint.parse()?;
    get_token_counter(implementation, checkpoint)
}
