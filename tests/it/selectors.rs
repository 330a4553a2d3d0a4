use super::*;

#[test]
fn test_unknown_implementation() {
    let err = get_token_counter_from_names("bert-wordpiece", "openai").unwrap_err();
    assert!(matches!(
        err,
        TokenCountError::UnknownImplementation(ref name) if name == "bert-wordpiece"
    ));
    assert_eq!(
        err.to_string(),
        "never heard of a 'bert-wordpiece' ClipImplementation"
    );
}

#[test]
fn test_unknown_checkpoint() {
    let err = get_token_counter_from_names("open_clip", "laion5b-g").unwrap_err();
    assert!(matches!(
        err,
        TokenCountError::UnknownCheckpoint(ref name) if name == "laion5b-g"
    ));
}

#[test]
fn test_selectors_from_config() -> crate::Result<()> {
    #[derive(serde::Deserialize)]
    struct PipelineConfig {
        implementation: ClipImplementation,
        checkpoint: ClipCheckpoint,
        device: Device,
    }

    let config: PipelineConfig = serde_json::from_str(
        r#"{"implementation": "open_clip", "checkpoint": "LAION", "device": "cuda:0"}"#,
    )?;
    assert_eq!(config.implementation, ClipImplementation::OpenClip);
    assert_eq!(config.checkpoint, ClipCheckpoint::Laion);
    assert_eq!(config.device, Device::Cuda(0));

    let bad = serde_json::from_str::<PipelineConfig>(
        r#"{"implementation": "hf", "checkpoint": "sdxl", "device": "cpu"}"#,
    );
    assert!(bad.is_err_and(|e| e.to_string().contains("never heard of 'sdxl'")));

    assert_eq!(
        serde_json::to_string(&ClipImplementation::HuggingFace)?,
        r#""hf""#
    );
    Ok(())
}
