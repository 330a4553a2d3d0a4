//
mod hf;
mod open_clip;
mod selectors;

#[allow(unused_imports)]
use anyhow::{anyhow, bail, Error, Result};
use clip_token_count::*;

const SHORT_PROMPT: &str = "a photograph of an astronaut riding a horse";
const EMPTY_PROMPT: &str = "";

fn long_prompt(words: usize) -> String {
    vec!["castle"; words].join(" ")
}
