use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 后端分页信封 `{count, next, previous, results}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// 总页数，至少为 1
    pub fn total_pages(&self, page_size: u64) -> u64 {
        if page_size == 0 {
            return 1;
        }
        self.count.div_ceil(page_size).max(1)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// 列表查询参数：搜索文本与页码
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置搜索文本，空白文本视为未设置
    pub fn with_search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    /// 转换为查询字符串键值对
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }
}

/// 兼容两种列表响应：裸数组，或带 `results` 的分页信封
///
/// 其它结构视为空列表并记录警告，避免页面崩溃。
pub fn decode_listing<T: DeserializeOwned>(body: &str) -> ApiResult<Vec<T>> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(ApiError::from),
        Value::Object(mut map) => match map.remove("results") {
            Some(results @ Value::Array(_)) => {
                serde_json::from_value(results).map_err(ApiError::from)
            }
            _ => {
                log::warn!("unexpected listing payload without results array");
                Ok(Vec::new())
            }
        },
        other => {
            log::warn!("unexpected listing payload: {}", other);
            Ok(Vec::new())
        }
    }
}

/// 解码分页信封；后端未启用分页时返回的裸数组视为单页
pub fn decode_page<T: DeserializeOwned>(body: &str) -> ApiResult<Page<T>> {
    let value: Value = serde_json::from_str(body)?;
    if value.is_array() {
        let results: Vec<T> = serde_json::from_value(value)?;
        return Ok(Page {
            count: results.len() as u64,
            results,
            ..Page::default()
        });
    }
    serde_json::from_value(value).map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up_and_never_drops_below_one() {
        let mut page: Page<u8> = Page::default();
        assert_eq!(page.total_pages(10), 1);
        page.count = 21;
        assert_eq!(page.total_pages(10), 3);
        page.count = 20;
        assert_eq!(page.total_pages(10), 2);
    }

    #[test]
    fn query_skips_blank_search() {
        let q = ListQuery::new().with_search("   ").with_page(2);
        assert_eq!(q.pairs(), vec![("page", "2".to_string())]);

        let q = ListQuery::new().with_search(" acme ");
        assert_eq!(q.pairs(), vec![("search", "acme".to_string())]);
    }

    #[test]
    fn listing_accepts_array_and_envelope() {
        let plain: Vec<u32> = decode_listing("[1, 2, 3]").unwrap();
        let paged: Vec<u32> =
            decode_listing(r#"{"count": 3, "next": null, "results": [1, 2, 3]}"#).unwrap();
        assert_eq!(plain, paged);
    }

    #[test]
    fn listing_with_unknown_shape_is_empty() {
        let items: Vec<u32> = decode_listing(r#"{"data": [1]}"#).unwrap();
        assert!(items.is_empty());
        let items: Vec<u32> = decode_listing("42").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn bare_array_is_a_single_page() {
        let page: Page<u32> = decode_page("[4, 5]").unwrap();
        assert_eq!(page.count, 2);
        assert!(!page.has_next());

        let page: Page<u32> =
            decode_page(r#"{"count": 25, "next": "http://x/?page=2", "previous": null, "results": [1]}"#)
                .unwrap();
        assert_eq!(page.total_pages(10), 3);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn malformed_items_are_still_an_error() {
        let err = decode_listing::<u32>(r#"["x"]"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
