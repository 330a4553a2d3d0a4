use std::path::Path;

use tokenizers::{
    decoders::byte_level::ByteLevel as ByteLevelDecoder,
    models::bpe::BPE,
    normalizers::{
        replace::{Replace, ReplacePattern},
        Lowercase, Sequence as NormalizerSequence, NFC,
    },
    pre_tokenizers::{
        byte_level::ByteLevel,
        sequence::Sequence as PreTokenizerSequence,
        split::{Split, SplitPattern},
    },
    processors::roberta::RobertaProcessing,
    AddedToken, SplitDelimiterBehavior, Tokenizer,
};

use crate::{hf_loader::HuggingFaceLoader, selectors::ClipCheckpoint};

const VOCAB_FILE: &str = "vocab.json";
const MERGES_FILE: &str = "merges.txt";

const START_OF_TEXT: (&str, u32) = ("<|startoftext|>", 49406);
const END_OF_TEXT: (&str, u32) = ("<|endoftext|>", 49407);

// Contractions, letter runs, single digits, and runs of everything else.
const CLIP_SPLIT_PATTERN: &str =
    r"'s|'t|'re|'ve|'m|'ll|'d|[\p{L}]+|[\p{N}]|[^\s\p{L}\p{N}]+";

/// Loads the pretrained CLIP tokenizer for `checkpoint`.
///
/// Every call resolves the files again through `loader`; hf-hub's on-disk cache is the only
/// reuse. The tokenizer adds `<|startoftext|>` and `<|endoftext|>` when asked for special
/// tokens and has no truncation or padding configured.
pub fn get_hf_tokenizer(
    checkpoint: ClipCheckpoint,
    loader: &HuggingFaceLoader,
) -> crate::Result<Tokenizer> {
    let source = checkpoint.pretrained_source();
    crate::debug!(%checkpoint, repo_id = source.repo_id, "Loading CLIP tokenizer");

    let vocab = loader.load_file(&source, VOCAB_FILE)?;
    let merges = loader.load_file(&source, MERGES_FILE)?;
    clip_tokenizer_from_files(&vocab, &merges)
}

/// Assembles the CLIP byte-level BPE pipeline from a `vocab.json` and `merges.txt`.
pub(crate) fn clip_tokenizer_from_files(vocab: &Path, merges: &Path) -> crate::Result<Tokenizer> {
    let model = BPE::from_file(&vocab.to_string_lossy(), &merges.to_string_lossy())
        .unk_token(END_OF_TEXT.0.to_string())
        .end_of_word_suffix("</w>".to_string())
        .build()?;

    let normalizer = NormalizerSequence::new(vec![
        NFC.into(),
        Replace::new(ReplacePattern::Regex(r"\s+".to_string()), " ")?.into(),
        Lowercase.into(),
    ]);

    let pre_tokenizer = PreTokenizerSequence::new(vec![
        Split::new(
            SplitPattern::Regex(CLIP_SPLIT_PATTERN.to_string()),
            SplitDelimiterBehavior::Removed,
            true,
        )?
        .into(),
        ByteLevel::new(false, true, false).into(),
    ]);

    let post_processor = RobertaProcessing::new(
        (END_OF_TEXT.0.to_string(), END_OF_TEXT.1),
        (START_OF_TEXT.0.to_string(), START_OF_TEXT.1),
    )
    .trim_offsets(false)
    .add_prefix_space(false);

    let mut tokenizer = Tokenizer::new(model);
    tokenizer
        .with_normalizer(Some(normalizer))
        .with_pre_tokenizer(Some(pre_tokenizer))
        .with_post_processor(Some(post_processor))
        .with_decoder(Some(ByteLevelDecoder::default()));
    // Literal special-token text in a prompt is one token, not BPE pieces.
    tokenizer.add_special_tokens(&[
        AddedToken::from(START_OF_TEXT.0, true),
        AddedToken::from(END_OF_TEXT.0, true),
    ]);
    Ok(tokenizer)
}

/// Writes a toy vocabulary in the CLIP layout: byte-level symbols, `</w>` word ends, and the
/// two special tokens at the top ids. `cat` encodes to the single id 7.
#[cfg(test)]
pub(crate) fn write_toy_clip_files(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    use std::io::Write;

    let vocab_path = dir.join(VOCAB_FILE);
    let merges_path = dir.join(MERGES_FILE);

    let mut vocab = serde_json::Map::new();
    for (id, token) in ["a", "c", "t", "a</w>", "c</w>", "t</w>", "ca", "cat</w>"]
        .iter()
        .enumerate()
    {
        vocab.insert(token.to_string(), serde_json::json!(id));
    }
    vocab.insert(START_OF_TEXT.0.to_string(), serde_json::json!(START_OF_TEXT.1));
    vocab.insert(END_OF_TEXT.0.to_string(), serde_json::json!(END_OF_TEXT.1));
    std::fs::write(&vocab_path, serde_json::Value::Object(vocab).to_string()).unwrap();

    let mut merges = std::fs::File::create(&merges_path).unwrap();
    writeln!(merges, "#version: 0.2").unwrap();
    writeln!(merges, "c a").unwrap();
    writeln!(merges, "ca t</w>").unwrap();

    (vocab_path, merges_path)
}
