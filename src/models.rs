use serde::Deserialize;

use crate::error::VocabError;

/// Longest accepted word / 单词最大长度
pub const MAX_WORD_LEN: usize = 200;

/// One recorded vocabulary entry / 词汇条目
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Vocab {
    pub id: i64,
    pub word: String,
    pub context: Option<String>,
    pub source: Option<String>,
    pub zipf: Option<f64>,
    pub created_at: String,
}

/// Raw "add vocab" form / 新增词汇表单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateVocabRequest {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// Kept as text so an empty input field means "no score" / 空字符串表示无分数
    #[serde(default)]
    pub zipf: Option<String>,
}

/// Validated entry ready to insert / 已校验的新条目
#[derive(Debug, Clone, PartialEq)]
pub struct NewVocab {
    pub word: String,
    pub context: Option<String>,
    pub source: Option<String>,
    pub zipf: Option<f64>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl TryFrom<&CreateVocabRequest> for NewVocab {
    type Error = VocabError;

    fn try_from(req: &CreateVocabRequest) -> Result<Self, Self::Error> {
        let word = req.word.trim();
        if word.is_empty() {
            return Err(VocabError::InvalidInput("Word is required".to_string()));
        }
        if word.chars().count() > MAX_WORD_LEN {
            return Err(VocabError::InvalidInput(format!(
                "Word must be at most {} characters",
                MAX_WORD_LEN
            )));
        }

        let zipf = match non_empty(req.zipf.as_deref()) {
            Some(raw) => {
                let value: f64 = raw
                    .parse()
                    .map_err(|_| VocabError::InvalidInput(format!("Invalid zipf score: {}", raw)))?;
                if !value.is_finite() {
                    return Err(VocabError::InvalidInput(format!("Invalid zipf score: {}", raw)));
                }
                Some(value)
            }
            None => None,
        };

        Ok(NewVocab {
            word: word.to_string(),
            context: non_empty(req.context.as_deref()),
            source: non_empty(req.source.as_deref()),
            zipf,
        })
    }
}
