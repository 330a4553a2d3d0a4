use super::*;

// These tests download tokenizer files from the Hugging Face Hub.

#[test]
#[ignore]
fn test_hf_single_prompt() -> crate::Result<()> {
    for checkpoint in ClipCheckpoint::ALL {
        let counter = get_token_counter(ClipImplementation::HuggingFace, checkpoint)?;
        let counts = counter.count_tokens_cpu(SHORT_PROMPT.into())?;
        assert_eq!(counts.len(), 1);
        assert!(counts[0] > 0);
    }
    Ok(())
}

#[test]
#[ignore]
fn test_hf_does_not_clamp() -> crate::Result<()> {
    let counter = get_token_counter(ClipImplementation::HuggingFace, ClipCheckpoint::OpenAi)?;
    let hundred = long_prompt(100);
    let counts = counter.count_tokens(
        [hundred.as_str(), EMPTY_PROMPT].into(),
        Device::Cuda(0),
    )?;
    assert_eq!(&*counts, &[100, 0]);
    assert_eq!(counts.device(), Device::Cuda(0));
    Ok(())
}

#[test]
#[ignore]
fn test_hf_matches_open_clip_below_context() -> crate::Result<()> {
    let hf = get_token_counter(ClipImplementation::HuggingFace, ClipCheckpoint::Laion)?;
    let open_clip = get_token_counter(ClipImplementation::OpenClip, ClipCheckpoint::Laion)?;
    let prompts = [SHORT_PROMPT, "Cyberpunk city at night, neon signs, 8k!!", EMPTY_PROMPT];
    assert_eq!(
        hf.count_tokens_cpu(prompts.into())?,
        open_clip.count_tokens_cpu(prompts.into())?
    );
    Ok(())
}

#[test]
#[ignore]
fn test_tokenizer_factory_is_uncached() -> crate::Result<()> {
    let loader = HuggingFaceLoader::default();
    let first = get_hf_tokenizer(ClipCheckpoint::OpenAi, &loader)?;
    let second = get_hf_tokenizer(ClipCheckpoint::OpenAi, &loader)?;
    assert_eq!(
        first.encode(SHORT_PROMPT, true).map_err(|e| anyhow!(e))?.get_ids(),
        second.encode(SHORT_PROMPT, true).map_err(|e| anyhow!(e))?.get_ids()
    );
    Ok(())
}
