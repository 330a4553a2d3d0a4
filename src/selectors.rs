use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::TokenCountError;

/// Which tokenizer library counts the tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ClipImplementation {
    /// Hugging Face `tokenizers`, loaded per checkpoint from the Hub.
    HuggingFace,
    /// OpenCLIP-compatible tokenizer with the bundled OpenAI CLIP vocabulary.
    OpenClip,
}

impl ClipImplementation {
    pub const ALL: [ClipImplementation; 2] =
        [ClipImplementation::HuggingFace, ClipImplementation::OpenClip];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClipImplementation::HuggingFace => "hf",
            ClipImplementation::OpenClip => "open_clip",
        }
    }
}

/// Which pretrained CLIP vocabulary and tokenizer config to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ClipCheckpoint {
    /// OpenAI CLIP ViT-L/14, the text encoder of Stable Diffusion 1.x.
    OpenAi,
    /// LAION OpenCLIP ViT-H/14, the text encoder of Stable Diffusion 2.x.
    Laion,
}

impl ClipCheckpoint {
    pub const ALL: [ClipCheckpoint; 2] = [ClipCheckpoint::OpenAi, ClipCheckpoint::Laion];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClipCheckpoint::OpenAi => "openai",
            ClipCheckpoint::Laion => "laion",
        }
    }

    /// Where the tokenizer files for this checkpoint live on the Hugging Face Hub.
    ///
    /// The LAION tokenizer is read from the Stable Diffusion 2 repo rather than
    /// `laion/CLIP-ViT-H-14-laion2B-s32B-b79K`, which shares the vocabulary.
    pub fn pretrained_source(&self) -> PretrainedSource {
        match self {
            ClipCheckpoint::OpenAi => PretrainedSource {
                repo_id: "openai/clip-vit-large-patch14",
                subfolder: None,
            },
            ClipCheckpoint::Laion => PretrainedSource {
                repo_id: "stabilityai/stable-diffusion-2",
                subfolder: Some("tokenizer"),
            },
        }
    }
}

/// A Hub repo plus the optional subfolder holding the tokenizer files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PretrainedSource {
    pub repo_id: &'static str,
    pub subfolder: Option<&'static str>,
}

impl PretrainedSource {
    /// Path of `file_name` relative to the repo root.
    pub fn file_path(&self, file_name: &str) -> String {
        match self.subfolder {
            Some(subfolder) => format!("{subfolder}/{file_name}"),
            None => file_name.to_string(),
        }
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

impl FromStr for ClipImplementation {
    type Err = TokenCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "hf" | "huggingface" | "hugging_face" | "transformers" => {
                Ok(ClipImplementation::HuggingFace)
            }
            "open_clip" | "openclip" => Ok(ClipImplementation::OpenClip),
            _ => Err(TokenCountError::UnknownImplementation(s.to_string())),
        }
    }
}

impl FromStr for ClipCheckpoint {
    type Err = TokenCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "openai" | "open_ai" => Ok(ClipCheckpoint::OpenAi),
            "laion" | "laion2b" => Ok(ClipCheckpoint::Laion),
            _ => Err(TokenCountError::UnknownCheckpoint(s.to_string())),
        }
    }
}

impl TryFrom<&str> for ClipImplementation {
    type Error = TokenCountError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for ClipImplementation {
    type Error = TokenCountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for ClipCheckpoint {
    type Error = TokenCountError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for ClipCheckpoint {
    type Error = TokenCountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClipImplementation> for &'static str {
    fn from(value: ClipImplementation) -> Self {
        value.as_str()
    }
}

impl From<ClipCheckpoint> for &'static str {
    fn from(value: ClipCheckpoint) -> Self {
        value.as_str()
    }
}

impl AsRef<str> for ClipImplementation {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ClipCheckpoint {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ClipImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ClipCheckpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
