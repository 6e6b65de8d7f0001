//! 采购录入表单状态
//!
//! 整张草稿保存在一个 `RwSignal<PurchaseDraft>` 中，子组件通过 `FormState`
//! 读写表头与明细行；校验、小计与合计都委托给 `PurchaseDraft`。

use leptos::prelude::*;
use lomalinda_shared::catalog::{Product, Supplier, Warehouse};
use lomalinda_shared::draft::{HeaderDraft, LineDraft, PurchaseDraft};

/// 表单状态
///
/// 只包含 `RwSignal`，实现 `Copy`，可直接作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub draft: RwSignal<PurchaseDraft>,
    pub saving: RwSignal<bool>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            draft: RwSignal::new(PurchaseDraft::new()),
            saving: RwSignal::new(false),
        }
    }

    /// 回到空表头 + 一行空明细
    pub fn reset(&self) {
        self.draft.update(PurchaseDraft::reset);
    }

    pub fn header<U>(&self, f: impl FnOnce(&HeaderDraft) -> U) -> U {
        self.draft.with(|d| f(&d.header))
    }

    pub fn update_header(&self, f: impl FnOnce(&mut HeaderDraft)) {
        self.draft.update(|d| f(&mut d.header));
    }

    /// 读取第 `index` 行；行已被删除时返回默认值
    pub fn line<U: Default>(&self, index: usize, f: impl FnOnce(&LineDraft) -> U) -> U {
        self.draft
            .with(|d| d.lines.get(index).map(f))
            .unwrap_or_default()
    }

    pub fn update_line(&self, index: usize, f: impl FnOnce(&mut LineDraft)) {
        self.draft.update(|d| {
            if let Some(line) = d.lines.get_mut(index) {
                f(line);
            }
        });
    }

    pub fn add_line(&self) {
        self.draft.update(PurchaseDraft::add_line);
    }

    pub fn remove_line(&self, index: usize) {
        self.draft.update(|d| {
            d.remove_line(index);
        });
    }

    pub fn line_count(&self) -> usize {
        self.draft.with(|d| d.lines.len())
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// 下拉框使用的目录数据
#[derive(Clone, Copy)]
pub struct Catalogs {
    pub suppliers: RwSignal<Vec<Supplier>>,
    pub warehouses: RwSignal<Vec<Warehouse>>,
    pub products: RwSignal<Vec<Product>>,
}

impl Catalogs {
    pub fn new() -> Self {
        Self {
            suppliers: RwSignal::new(Vec::new()),
            warehouses: RwSignal::new(Vec::new()),
            products: RwSignal::new(Vec::new()),
        }
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::new()
    }
}

/// `<select>` 的值与可选 id 互转，空字符串表示未选择
pub fn parse_selection(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

pub fn selection_value(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_is_none() {
        assert_eq!(parse_selection(""), None);
        assert_eq!(parse_selection("12"), Some(12));
        assert_eq!(parse_selection("abc"), None);
        assert_eq!(selection_value(None), "");
        assert_eq!(selection_value(Some(4)), "4");
    }
}
