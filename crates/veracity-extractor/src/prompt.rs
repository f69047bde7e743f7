//! LLM prompt engineering for claim extraction

/// Builds prompts for the LLM to decompose input into atomic claims
pub struct PromptBuilder {
    text: String,
    max_claims: usize,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(text: String, max_claims: usize) -> Self {
        Self { text, max_claims }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(&format!("Extract at most {} claims.\n\n", self.max_claims));

        prompt.push_str("Text to analyze:\n");
        prompt.push_str("---\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }

    /// JSON schema description passed alongside the prompt
    pub fn schema() -> &'static str {
        CLAIM_SCHEMA
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Decompose the following text into atomic claims.
Each claim must be a single, independently verifiable assertion.

Rules:
- One assertion per claim; split compound sentences
- Preserve the claim's direction exactly as phrased: never invert
  comparatives or superlatives ("A is better than B" stays about A)
- role is one of:
  - "core": a substantive factual assertion about the world
  - "attribution": who said or reported something
  - "source": where a statement originated
  - "timing": when something was said or happened
- central: true only for the few core claims the text's main point rests on;
  most claims are not central
- Do not merge distinct events, proceedings, methodologies or timeframes
  into one claim
- Do not invent claims that are not asserted by the text"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON array only, no additional text):
[
  {
    "text": "exact verifiable assertion",
    "role": "core",
    "central": false
  }
]

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;

const CLAIM_SCHEMA: &str = r#"[{"text": "string", "role": "core|attribution|source|timing", "central": "boolean"}]"#;
