//! Tolerant extraction of translated text from model-shaped responses

use serde_json::Value;

/// Pull a translated string out of any of the historically observed
/// response shapes.
///
/// Probes, in order: a bare string; `{translated_text}`; `{translation}`
/// holding a string, a `{translated_text}` object, or a list (first
/// element's `translation_text`, else the first element when it is a
/// string); then the same two list forms at the top level. `None` means
/// "no translation available" and is never an error.
pub fn extract_translated_text(response: &Value) -> Option<String> {
    if let Some(text) = response.as_str() {
        return Some(text.to_string());
    }

    if let Some(text) = response.get("translated_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    if let Some(translation) = response.get("translation") {
        if let Some(text) = translation.as_str() {
            return Some(text.to_string());
        }
        if let Some(text) = translation.get("translated_text").and_then(Value::as_str) {
            return Some(text.to_string());
        }
        if let Some(first) = translation.as_array().and_then(|list| list.first()) {
            return first_element_text(first);
        }
        return None;
    }

    if let Some(first) = response.as_array().and_then(|list| list.first()) {
        return first_element_text(first);
    }

    None
}

fn first_element_text(element: &Value) -> Option<String> {
    if let Some(text) = element.get("translation_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    element.as_str().map(str::to_string)
}
