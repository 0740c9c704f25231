use miette::SourceSpan;
use std::collections::HashMap;
use std::path::Path;
use yaml_spanned::{Spanned, Value as YamlValue};

use super::error::DocumentError;

#[derive(Debug, Clone, Copy)]
struct SpanInfo {
    start: usize,
    end: usize,
}

impl SpanInfo {
    fn of(spanned: &Spanned<YamlValue>) -> Self {
        let span = spanned.span();
        Self {
            start: span.start.unwrap_or_default().byte_index,
            end: span.end.unwrap_or_default().byte_index,
        }
    }

    fn source_span(&self) -> SourceSpan {
        SourceSpan::new(self.start.into(), self.end.saturating_sub(self.start))
    }
}

/// A mapping key that has no JSON counterpart
struct KeyError {
    span: SpanInfo,
    message: String,
}

/// A parsed YAML or JSON document that remembers where each value came from.
///
/// Values are addressed by JSON pointer (`/events/3/orgUnit`), which is what
/// schema errors report.
pub struct SpannedDocument {
    spans: HashMap<String, SpanInfo>,
    value: serde_json::Value,
    source: String,
    path: String,
}

impl SpannedDocument {
    /// Parse by extension: `.json` with serde_json, anything else as YAML
    pub fn parse(path: &Path, source: String) -> Result<Self, DocumentError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::parse_json(path, source)
        } else {
            Self::parse_yaml(path, source)
        }
    }

    fn parse_json(path: &Path, source: String) -> Result<Self, DocumentError> {
        let value: serde_json::Value = serde_json::from_str(&source).map_err(|e| {
            let offset = crate::error_utils::line_col_to_offset(&source, e.line(), e.column());
            DocumentError::new(
                path,
                &source,
                SourceSpan::from(offset),
                format!("Failed to parse {}: {e}", path.display()),
            )
        })?;

        // Spans are best effort; unindexed pointers fall back to the file start
        let mut spans = HashMap::new();
        let spanned: Result<Spanned<YamlValue>, _> = yaml_spanned::from_str(&source);
        if let Ok(spanned) = spanned {
            let _ = Self::strip_spans_and_index(&spanned, String::new(), &mut spans);
        }

        Ok(Self {
            spans,
            value,
            path: path.display().to_string(),
            source,
        })
    }

    fn parse_yaml(path: &Path, source: String) -> Result<Self, DocumentError> {
        // serde_yaml reports a usable location for syntax errors
        if let Err(e) = serde_yaml::from_str::<serde_yaml::Value>(&source) {
            let offset = e.location().map(|l| l.index()).unwrap_or(0);
            return Err(DocumentError::new(
                path,
                &source,
                SourceSpan::from(offset),
                format!("Failed to parse {}: {e}", path.display()),
            ));
        }

        let spanned: Spanned<YamlValue> = yaml_spanned::from_str(&source).map_err(|e| {
            DocumentError::new(
                path,
                &source,
                SourceSpan::from(0),
                format!("Failed to parse {}: {e}", path.display()),
            )
        })?;

        let mut spans = HashMap::new();
        let value = Self::strip_spans_and_index(&spanned, String::new(), &mut spans).map_err(
            |KeyError { span, message }| {
                DocumentError::new(path, &source, span.source_span(), message)
                    .with_help("Quote the key to make it a string")
            },
        )?;

        Ok(Self {
            spans,
            value,
            path: path.display().to_string(),
            source,
        })
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Error pointing at the value under `pointer`, or its closest ancestor
    pub fn error_at(&self, pointer: &str, message: String) -> DocumentError {
        let mut key = pointer;
        let span = loop {
            if let Some(span) = self.spans.get(key) {
                break *span;
            }
            match key.rfind('/') {
                Some(idx) => key = &key[..idx],
                None => break SpanInfo { start: 0, end: 0 },
            }
        };

        DocumentError::new(
            Path::new(&self.path),
            &self.source,
            span.source_span(),
            message,
        )
    }

    fn strip_spans_and_index(
        spanned: &Spanned<YamlValue>,
        path: String,
        spans: &mut HashMap<String, SpanInfo>,
    ) -> Result<serde_json::Value, KeyError> {
        spans.insert(path.clone(), SpanInfo::of(spanned));

        let value = match spanned.as_ref() {
            YamlValue::Null => serde_json::Value::Null,
            YamlValue::Bool(b) => serde_json::Value::Bool(*b),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    serde_json::Value::Number(serde_json::Number::from(i))
                } else if let Some(u) = n.as_u64() {
                    serde_json::Value::Number(serde_json::Number::from(u))
                } else if let Some(f) = n.as_f64() {
                    serde_json::Number::from_f64(f)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                } else {
                    serde_json::Value::Null
                }
            }
            YamlValue::String(s) => serde_json::Value::String(s.clone()),
            YamlValue::Sequence(seq) => serde_json::Value::Array(
                seq.iter()
                    .enumerate()
                    .map(|(i, item)| Self::strip_spans_and_index(item, format!("{path}/{i}"), spans))
                    .collect::<Result<_, _>>()?,
            ),
            YamlValue::Mapping(map) => {
                let mut obj = serde_json::Map::new();
                for (key_spanned, value_spanned) in map {
                    let YamlValue::String(key) = key_spanned.as_ref() else {
                        return Err(KeyError {
                            span: SpanInfo::of(key_spanned),
                            message: format!(
                                "Mapping key under {} is not a string",
                                if path.is_empty() { "/" } else { path.as_str() }
                            ),
                        });
                    };
                    let pointer_key = key.replace('~', "~0").replace('/', "~1");
                    let value = Self::strip_spans_and_index(
                        value_spanned,
                        format!("{path}/{pointer_key}"),
                        spans,
                    )?;
                    obj.insert(key.clone(), value);
                }
                serde_json::Value::Object(obj)
            }
            YamlValue::Tagged(tagged_value) => {
                Self::strip_spans_and_index(&tagged_value.value, path, spans)?
            }
        };
        Ok(value)
    }
}
