use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/chat`. A missing `question` decodes as empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: String,
}

impl ChatRequest {
    /// Decode the first JSON value of a request body.
    ///
    /// Anything after that value is ignored. The `question` key is matched
    /// exactly first, then case-insensitively. `null` (for the whole body or
    /// for the field) reads as an empty question.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        let first = serde_json::Deserializer::from_slice(body)
            .into_iter::<Value>()
            .next()
            .unwrap_or_else(|| Err(serde_json::Error::custom("empty request body")))?;

        let fields = match first {
            Value::Null => return Ok(Self::default()),
            Value::Object(fields) => fields,
            other => {
                return Err(serde_json::Error::custom(format!(
                    "expected an object, got {}",
                    other
                )))
            }
        };

        let question = fields.get("question").or_else(|| {
            fields
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("question"))
                .map(|(_, value)| value)
        });

        match question {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::String(question)) => Ok(Self {
                question: question.clone(),
            }),
            Some(other) => Err(serde_json::Error::custom(format!(
                "question must be a string, got {}",
                other
            ))),
        }
    }
}

/// Successful reply of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub answer: String,
}
