use std::fmt::Debug;

use tokenizers::{Encoding, Tokenizer};

use super::{CountTokens, TokenCounts};
use crate::{device::Device, prompts::Prompts};

/// The `<|startoftext|>` and `<|endoftext|>` tokens included in every encoded length.
pub const SPECIAL_TOKEN_OFFSET: usize = 2;

/// A pretrained tokenizer that reports per-prompt lengths with special tokens included.
pub trait PretrainedTokenizer: Send + Sync + Debug {
    /// Full encoded length of each prompt, special tokens included, with no truncation and
    /// no padding. One length per prompt, in input order.
    fn encoded_lengths(&self, prompts: &[&str]) -> crate::Result<Vec<usize>>;
}

impl PretrainedTokenizer for Tokenizer {
    fn encoded_lengths(&self, prompts: &[&str]) -> crate::Result<Vec<usize>> {
        let encodings = self.encode_batch(prompts.to_vec(), true)?;
        Ok(encodings.iter().map(Encoding::len).collect())
    }
}

/// Counts with a Hugging Face tokenizer.
///
/// Counts are the encoded length minus [`SPECIAL_TOKEN_OFFSET`]. They are not clamped, so a
/// long prompt can report more tokens than the text encoder will ever see.
#[derive(Debug)]
pub struct HfTokenCounter<T = Tokenizer> {
    tokenizer: T,
}

impl<T: PretrainedTokenizer> HfTokenCounter<T> {
    /// `tokenizer` must not have truncation or padding configured.
    pub fn new(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }
}

impl<T: PretrainedTokenizer> CountTokens for HfTokenCounter<T> {
    fn count_tokens(&self, prompts: Prompts<'_>, device: Device) -> crate::Result<TokenCounts> {
        let lengths = self.tokenizer.encoded_lengths(&prompts.as_batch())?;
        debug_assert_eq!(lengths.len(), prompts.len());
        let counts = lengths
            .into_iter()
            .map(|length| length.saturating_sub(SPECIAL_TOKEN_OFFSET))
            .collect();
        Ok(TokenCounts::new(counts, device))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One token per whitespace-separated word, wrapped in two special tokens.
    #[derive(Debug)]
    struct WordTokenizer;

    impl PretrainedTokenizer for WordTokenizer {
        fn encoded_lengths(&self, prompts: &[&str]) -> crate::Result<Vec<usize>> {
            Ok(prompts
                .iter()
                .map(|prompt| prompt.split_whitespace().count() + SPECIAL_TOKEN_OFFSET)
                .collect())
        }
    }

    #[test]
    fn subtracts_special_tokens() {
        let counter = HfTokenCounter::new(WordTokenizer);
        let counts = counter
            .count_tokens_cpu("a watercolor fox in the snow".into())
            .unwrap();
        assert_eq!(counts.into_vec(), vec![6]);
    }

    #[test]
    fn does_not_clamp_long_prompts() {
        let counter = HfTokenCounter::new(WordTokenizer);
        let long_prompt = vec!["word"; 100].join(" ");
        let counts = counter
            .count_tokens([long_prompt.as_str(), "short"].into(), Device::Cuda(0))
            .unwrap();
        assert_eq!(&*counts, &[100, 1]);
        assert_eq!(counts.device(), Device::Cuda(0));
    }

    #[test]
    fn empty_prompt_counts_zero() {
        let counter = HfTokenCounter::new(WordTokenizer);
        let counts = counter.count_tokens_cpu(["", "  "].into()).unwrap();
        assert_eq!(&*counts, &[0, 0]);
    }

    #[derive(Debug)]
    struct BareTokenizer;

    impl PretrainedTokenizer for BareTokenizer {
        fn encoded_lengths(&self, prompts: &[&str]) -> crate::Result<Vec<usize>> {
            Ok(vec![0; prompts.len()])
        }
    }

    #[test]
    fn never_negative() {
        let counter = HfTokenCounter::new(BareTokenizer);
        let counts = counter.count_tokens_cpu("".into()).unwrap();
        assert_eq!(&*counts, &[0]);
    }

    #[test]
    fn real_tokenizer_batch_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let (vocab, merges) = crate::tokenizer::write_toy_clip_files(dir.path());
        let tokenizer = crate::tokenizer::clip_tokenizer_from_files(&vocab, &merges).unwrap();
        let counter = HfTokenCounter::new(tokenizer);

        let counts = counter
            .count_tokens(["cat cat", "", "cat", "cat <|endoftext|>"].into(), Device::Cuda(0))
            .unwrap();
        assert_eq!(&*counts, &[2, 0, 1, 2]);
        assert_eq!(counts.device(), Device::Cuda(0));
    }
}
