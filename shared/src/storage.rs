use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 持久化键值存储抽象
///
/// 浏览器中对应 `localStorage`；测试与非浏览器环境使用 `MemoryStore`。
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// 写入值，成功返回 true
    fn set(&self, key: &str, value: &str) -> bool;
    /// 删除值，成功返回 true
    fn delete(&self, key: &str) -> bool;
}

/// 内存存储
///
/// 克隆体共享同一份数据，可用来模拟"刷新页面后重新读取存储"。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.data.borrow_mut().remove(key);
        true
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> bool {
        (**self).delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("auth_token", "abc");
        assert_eq!(other.get("auth_token").as_deref(), Some("abc"));
        other.delete("auth_token");
        assert!(!store.contains("auth_token"));
    }
}
