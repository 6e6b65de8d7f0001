//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现共享层的 `KeyValueStore`，会话令牌保存在这里。

use lomalinda_shared::storage::KeyValueStore;

/// 浏览器 LocalStorage
///
/// 无法访问存储（隐私模式等）时读取返回 `None`，写入返回 `false`。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let ok = Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some();
        if !ok {
            log::warn!("localStorage write failed for key {key}");
        }
        ok
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
