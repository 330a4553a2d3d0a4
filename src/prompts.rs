/// One prompt or an ordered batch of prompts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompts<'a> {
    Single(&'a str),
    Batch(Vec<&'a str>),
}

impl<'a> Prompts<'a> {
    /// Number of prompts; a single string counts as one.
    pub fn len(&self) -> usize {
        match self {
            Prompts::Single(_) => 1,
            Prompts::Batch(prompts) => prompts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The prompts as a batch, in input order.
    pub fn as_batch(&self) -> Vec<&'a str> {
        match self {
            Prompts::Single(prompt) => vec![*prompt],
            Prompts::Batch(prompts) => prompts.clone(),
        }
    }
}

impl<'a> From<&'a str> for Prompts<'a> {
    fn from(prompt: &'a str) -> Self {
        Prompts::Single(prompt)
    }
}

impl<'a> From<&'a String> for Prompts<'a> {
    fn from(prompt: &'a String) -> Self {
        Prompts::Single(prompt.as_str())
    }
}

impl<'a> From<Vec<&'a str>> for Prompts<'a> {
    fn from(prompts: Vec<&'a str>) -> Self {
        Prompts::Batch(prompts)
    }
}

impl<'a> From<&[&'a str]> for Prompts<'a> {
    fn from(prompts: &[&'a str]) -> Self {
        Prompts::Batch(prompts.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Prompts<'a> {
    fn from(prompts: [&'a str; N]) -> Self {
        Prompts::Batch(prompts.to_vec())
    }
}

impl<'a> From<&'a [String]> for Prompts<'a> {
    fn from(prompts: &'a [String]) -> Self {
        Prompts::Batch(prompts.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for Prompts<'a> {
    fn from(prompts: &'a Vec<String>) -> Self {
        Prompts::from(prompts.as_slice())
    }
}
