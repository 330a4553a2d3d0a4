use super::*;

#[test]
fn test_single_prompt() -> crate::Result<()> {
    for checkpoint in ClipCheckpoint::ALL {
        let counter = get_token_counter(ClipImplementation::OpenClip, checkpoint)?;
        let counts = counter.count_tokens_cpu(SHORT_PROMPT.into())?;
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.device(), Device::Cpu);
        assert!(counts[0] > 0);
    }
    Ok(())
}

#[test]
fn test_batch_alignment() -> crate::Result<()> {
    let counter = get_token_counter(ClipImplementation::OpenClip, ClipCheckpoint::OpenAi)?;
    let prompts = vec![
        long_prompt(3),
        EMPTY_PROMPT.to_string(),
        long_prompt(1),
        long_prompt(2),
    ];
    let counts = counter.count_tokens((&prompts).into(), "cuda:1".parse()?)?;
    assert_eq!(counts.device(), Device::Cuda(1));
    assert_eq!(counts.into_vec(), vec![3, 0, 1, 2]);
    Ok(())
}

#[test]
fn test_clamps_to_context() -> crate::Result<()> {
    let counter = get_token_counter(ClipImplementation::OpenClip, ClipCheckpoint::OpenAi)?;
    let hundred = long_prompt(100);
    let ten = long_prompt(10);
    let counts = counter.count_tokens_cpu([hundred.as_str(), ten.as_str()].into())?;
    assert_eq!(&*counts, &[MAX_NONSPECIAL_TOKENS, 10]);
    assert_eq!(MAX_NONSPECIAL_TOKENS, 75);
    Ok(())
}
