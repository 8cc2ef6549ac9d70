//! 请求体反序列化辅助函数

use serde::{Deserialize, Deserializer};

/// 宽松解析引用 ID：整数或数字字符串视为有效 ID，其余任何值（含 null）视为缺失
///
/// 用于权限规则需要自行判定“缺失即拒绝”的字段，避免在规则执行前被 JSON 解析拦截为 400。
pub fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_id(&value))
}

/// 从任意 JSON 值中宽松提取 ID，规则同 [`deserialize_lenient_id`]
pub fn lenient_id(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// 区分“字段缺失”和“显式为 null”
///
/// 与 `#[serde(default)]` 搭配：缺失 → `None`，null → `Some(None)`，有值 → `Some(Some(v))`。
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Reference {
        #[serde(default, deserialize_with = "deserialize_lenient_id")]
        course: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        file: Option<Option<String>>,
    }

    #[test]
    fn test_lenient_id() {
        let parse = |json: &str| serde_json::from_str::<Reference>(json).unwrap().course;
        assert_eq!(parse(r#"{"course": 7}"#), Some(7));
        assert_eq!(parse(r#"{"course": "12"}"#), Some(12));
        assert_eq!(parse(r#"{"course": "abc"}"#), None);
        assert_eq!(parse(r#"{"course": null}"#), None);
        assert_eq!(parse(r#"{"course": [1]}"#), None);
        assert_eq!(parse(r#"{}"#), None);
    }

    #[test]
    fn test_lenient_id_from_raw_value() {
        let body = serde_json::json!({"course": "3", "rating": 5});
        assert_eq!(lenient_id(&body["course"]), Some(3));
        assert_eq!(lenient_id(&body["missing"]), None);
        assert_eq!(lenient_id(&serde_json::json!(2.5)), None);
    }

    #[test]
    fn test_absent_vs_null() {
        let parse = |json: &str| serde_json::from_str::<Patch>(json).unwrap().file;
        assert_eq!(parse(r#"{}"#), None);
        assert_eq!(parse(r#"{"file": null}"#), Some(None));
        assert_eq!(
            parse(r#"{"file": "lessons/intro.pdf"}"#),
            Some(Some("lessons/intro.pdf".to_string()))
        );
    }
}
