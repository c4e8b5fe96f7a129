use serde::{Deserialize, Serialize};

use crate::{
    config::OpenAIConfig,
    entities::ExtractedPlace,
    error::{extraction_error, Error},
};

const EXTRACTION_PROMPT: &str = r#"Extract real travel places from the text.
Rules:
- Only physical places people can visit
- Deduplicate
- Category: cafe | restaurant | attraction | nature | shopping | other
- Confidence between 0 and 1

Return ONLY JSON array like:
[
  {
    "name": "Place name",
    "category": "cafe",
    "confidence": 0.9
  }
]

Text:
"#;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: Vec<Message>,
}

#[derive(Clone, Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Clone, Debug, Deserialize)]
struct Choice {
    message: Message,
}

pub fn extraction_prompt(text: &str) -> String {
    format!("\n{}{}\n", EXTRACTION_PROMPT, text)
}

/// Parses the model's reply as a strict JSON array of places and validates
/// every entry. Surrounding prose or markdown fences are not tolerated.
pub fn parse_places(content: &str) -> Result<Vec<ExtractedPlace>, Error> {
    let places: Vec<ExtractedPlace> = serde_json::from_str(content).map_err(extraction_error)?;

    for (index, place) in places.iter().enumerate() {
        place
            .validate()
            .map_err(|reason| extraction_error(format!("place {}: {}", index, reason)))?;
    }

    Ok(places)
}

#[derive(Clone)]
pub struct OpenAI {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl OpenAI {
    pub fn new(http: reqwest::Client, config: &OpenAIConfig) -> Self {
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn extract_places(&self, text: &str) -> Result<Vec<ExtractedPlace>, Error> {
        let url = format!("{}/chat/completions", self.api_base);

        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user".into(),
                content: Some(extraction_prompt(text)),
            }],
        };

        let res = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(extraction_error)?;

        let status_code = res.status();
        if !status_code.is_success() {
            return Err(extraction_error(status_code));
        }

        let data: ChatResponse = res.json().await.map_err(extraction_error)?;

        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| extraction_error("response has no message content"))?;

        let places = parse_places(&content)?;
        tracing::debug!(count = places.len(), "extracted places");

        Ok(places)
    }
}

#[test]
fn parse_places_accepts_strict_array() {
    let places = parse_places(
        r#"[{"name":"Blue Bottle","category":"cafe","confidence":0.9},
            {"name":"Yosemite","category":"nature","confidence":0.85}]"#,
    )
    .unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Blue Bottle");
    assert_eq!(places[1].category, crate::entities::Category::Nature);

    assert!(parse_places("[]").unwrap().is_empty());
}

#[test]
fn parse_places_rejects_prose_and_fences() {
    assert_eq!(
        parse_places("Sure! Here are the places you mentioned.")
            .unwrap_err()
            .code,
        4
    );
    assert!(parse_places("```json\n[]\n```").is_err());
    assert!(parse_places(r#"{"name":"Yosemite","category":"nature","confidence":0.8}"#).is_err());
}

#[test]
fn parse_places_rejects_invalid_entries() {
    let err = parse_places(
        r#"[{"name":"Yosemite","category":"nature","confidence":0.8},
            {"name":"","category":"cafe","confidence":0.5}]"#,
    )
    .unwrap_err();
    assert!(err.message.contains("place 1"));

    assert!(parse_places(r#"[{"name":"Pier 39","category":"pier","confidence":0.5}]"#).is_err());
    assert!(parse_places(r#"[{"name":"Pier 39","category":"other","confidence":-0.1}]"#).is_err());
}

#[test]
fn prompt_embeds_text() {
    let prompt = extraction_prompt("coffee at Blue Bottle");

    assert!(prompt.contains("Return ONLY JSON array"));
    assert!(prompt.ends_with("Text:\ncoffee at Blue Bottle\n"));
}
