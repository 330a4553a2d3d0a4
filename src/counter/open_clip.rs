use std::fmt;

use super::{CountTokens, TokenCounts};
use crate::{device::Device, prompts::Prompts};

/// Sequence length of the CLIP text encoder.
pub const CONTEXT_LENGTH: usize = 77;
/// Start and end tokens the text encoder adds around every prompt.
pub const SPECIAL_TOKEN_COUNT: usize = 2;
/// Most prompt tokens the text encoder can take.
pub const MAX_NONSPECIAL_TOKENS: usize = CONTEXT_LENGTH - SPECIAL_TOKEN_COUNT;

/// An OpenCLIP style encoder: text to BPE ids, no special tokens added.
pub trait ClipEncoder: Send + Sync + fmt::Debug {
    /// BPE ids of each prompt, in input order.
    fn encode_batch(&self, prompts: &[&str]) -> Vec<Vec<u32>>;
}

/// The OpenAI CLIP tokenizer with its bundled vocabulary, shared by OpenAI and LAION models.
pub struct BundledClipEncoder(instant_clip_tokenizer::Tokenizer);

impl BundledClipEncoder {
    pub fn new() -> Self {
        Self(instant_clip_tokenizer::Tokenizer::new())
    }
}

impl Default for BundledClipEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BundledClipEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BundledClipEncoder")
    }
}

impl ClipEncoder for BundledClipEncoder {
    // Literal `<|startoftext|>`/`<|endoftext|>` text follows the bundled tokenizer's own
    // rules and may come out as BPE pieces. The Hugging Face pipeline always matches it as
    // one special token.
    fn encode_batch(&self, prompts: &[&str]) -> Vec<Vec<u32>> {
        let mut tokens = Vec::new();
        prompts
            .iter()
            .map(|prompt| {
                self.0.encode(prompt, &mut tokens);
                tokens.drain(..).map(|token| u32::from(token.to_u16())).collect()
            })
            .collect()
    }
}

/// Counts with an OpenCLIP style encoder.
///
/// Counts are the raw encoded lengths clamped to [`MAX_NONSPECIAL_TOKENS`], the number of
/// tokens the text encoder will actually use.
#[derive(Debug)]
pub struct OpenClipTokenCounter<E = BundledClipEncoder> {
    encoder: E,
}

impl<E: ClipEncoder> OpenClipTokenCounter<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }
}

impl<E: ClipEncoder> CountTokens for OpenClipTokenCounter<E> {
    fn count_tokens(&self, prompts: Prompts<'_>, device: Device) -> crate::Result<TokenCounts> {
        let counts = self
            .encoder
            .encode_batch(&prompts.as_batch())
            .iter()
            .map(|tokens| tokens.len().min(MAX_NONSPECIAL_TOKENS))
            .collect();
        Ok(TokenCounts::new(counts, device))
    }
}
