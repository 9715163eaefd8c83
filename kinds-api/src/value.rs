use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// MetaValue 元数据值：字符串、数字、列表或对象
///
/// Post的元数据映射中的每个值都是这个类型。列表是普通的顺序列表，
/// 对象保留键的插入顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Num(i64),
    Str(String),
    List(Vec<MetaValue>),
    Map(IndexMap<String, MetaValue>),
}

impl MetaValue {
    /// 值是否为空（空字符串、空列表、空对象）
    pub fn is_empty(&self) -> bool {
        match self {
            MetaValue::Num(_) => false,
            MetaValue::Str(s) => s.is_empty(),
            MetaValue::List(items) => items.is_empty(),
            MetaValue::Map(map) => map.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// 作为附件ID解读：数字，或可解析为数字的字符串
    pub fn as_id(&self) -> Option<i64> {
        match self {
            MetaValue::Num(n) => Some(*n),
            MetaValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// 如果是列表则取第一个元素，否则原样返回
    pub fn into_first(self) -> Option<MetaValue> {
        match self {
            MetaValue::List(items) => items.into_iter().next(),
            other => Some(other),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Str(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Str(s)
    }
}

impl From<i64> for MetaValue {
    fn from(n: i64) -> Self {
        MetaValue::Num(n)
    }
}

/// 把多值元数据折叠为单值视图
///
/// 规则按顺序应用，顺序不可调整：
/// 1. 非列表原样返回（对象视为标量）；
/// 2. 单元素列表返回该元素本身，不再递归；
/// 3. discard 时普通列表返回首元素；
/// 4. 含嵌套列表时对每个元素递归折叠；
/// 5. 其余情况列表原样返回。
pub fn collapse_to_single(value: MetaValue, discard: bool) -> MetaValue {
    let mut items = match value {
        MetaValue::List(items) => items,
        other => return other,
    };
    if items.len() == 1 {
        return items.remove(0);
    }
    if discard && !items.is_empty() {
        return items.remove(0);
    }
    if items.iter().any(|item| matches!(item, MetaValue::List(_))) {
        return MetaValue::List(
            items
                .into_iter()
                .map(|item| collapse_to_single(item, false))
                .collect(),
        );
    }
    MetaValue::List(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: Vec<MetaValue>) -> MetaValue {
        MetaValue::List(items)
    }

    #[test]
    fn test_scalar_passes_through() {
        let value = MetaValue::from("hello");
        assert_eq!(collapse_to_single(value.clone(), false), value);
        assert_eq!(collapse_to_single(MetaValue::Num(7), true), MetaValue::Num(7));
    }

    #[test]
    fn test_map_is_scalar() {
        let mut map = IndexMap::new();
        map.insert("url".to_string(), MetaValue::from("https://example.com"));
        let value = MetaValue::Map(map);
        assert_eq!(collapse_to_single(value.clone(), false), value);
    }

    #[test]
    fn test_singleton_collapses_to_bare_element() {
        let value = list(vec![MetaValue::from("only")]);
        assert_eq!(collapse_to_single(value, false), MetaValue::from("only"));

        // 单元素列表即使嵌套也只返回元素本身，不递归
        let nested = list(vec![list(vec![
            MetaValue::from("a"),
            MetaValue::from("b"),
        ])]);
        assert_eq!(
            collapse_to_single(nested, false),
            list(vec![MetaValue::from("a"), MetaValue::from("b")])
        );
    }

    #[test]
    fn test_discard_takes_first() {
        let value = list(vec![MetaValue::from("a"), MetaValue::from("b")]);
        assert_eq!(collapse_to_single(value, true), MetaValue::from("a"));
    }

    #[test]
    fn test_multi_dimensional_recurses() {
        let value = list(vec![
            list(vec![MetaValue::from("a")]),
            list(vec![MetaValue::from("b"), MetaValue::from("c")]),
        ]);
        let collapsed = collapse_to_single(value, false);
        assert_eq!(
            collapsed,
            list(vec![
                MetaValue::from("a"),
                list(vec![MetaValue::from("b"), MetaValue::from("c")]),
            ])
        );
    }

    #[test]
    fn test_plain_list_unchanged_without_discard() {
        let value = list(vec![MetaValue::from("a"), MetaValue::from("b")]);
        assert_eq!(collapse_to_single(value.clone(), false), value);
    }

    #[test]
    fn test_idempotent() {
        let values = vec![
            MetaValue::from("scalar"),
            list(vec![MetaValue::from("a"), MetaValue::from("b")]),
            list(vec![
                list(vec![MetaValue::from("a")]),
                list(vec![MetaValue::from("b"), MetaValue::from("c")]),
            ]),
        ];
        for value in values {
            let once = collapse_to_single(value, false);
            let twice = collapse_to_single(once.clone(), false);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_untagged_serde() {
        let value = list(vec![MetaValue::from("a"), MetaValue::Num(3)]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"["a",3]"#);
        let back: MetaValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
