use serde::de::DeserializeOwned;

// 模型经常在 JSON 外面包一层说明或代码块，只取最外层对象
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

pub fn parse_model_json<T: DeserializeOwned>(text: &str) -> anyhow::Result<T> {
    let object = extract_json_object(text)
        .ok_or_else(|| anyhow::anyhow!("No JSON object in model output: {:?}", text))?;
    Ok(serde_json::from_str(object)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn strips_code_fences() {
        let raw = "```json\n{\"approved\": true}\n```";
        assert_eq!(extract_json_object(raw), Some("{\"approved\": true}"));
    }

    #[test]
    fn rejects_text_without_object() {
        assert!(extract_json_object("oui").is_none());
        assert!(extract_json_object("} {").is_none());
        assert!(parse_model_json::<Value>("pas de json").is_err());
    }
}
