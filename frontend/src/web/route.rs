//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、它们的属性以及守卫决策。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    Login,
    /// 采购录入 (默认落地页)
    #[default]
    Purchases,
    /// 库存查询
    Stock,
    Products,
    Warehouses,
    Suppliers,
    /// 页面未找到
    NotFound,
}

/// 守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// 放行到目标路由
    Allow(AppRoute),
    /// 重定向到其它路由
    Redirect(AppRoute),
}

impl RouteDecision {
    /// 最终要渲染的路由
    pub fn route(&self) -> AppRoute {
        match self {
            RouteDecision::Allow(r) | RouteDecision::Redirect(r) => *r,
        }
    }
}

impl AppRoute {
    /// 侧边栏导航顺序
    pub const NAVIGATION: [AppRoute; 5] = [
        AppRoute::Purchases,
        AppRoute::Stock,
        AppRoute::Products,
        AppRoute::Warehouses,
        AppRoute::Suppliers,
    ];

    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        match path {
            "/login" => Self::Login,
            "/" | "/compras" => Self::Purchases,
            "/inventario/existencias" => Self::Stock,
            "/productos" => Self::Products,
            "/bodegas" => Self::Warehouses,
            "/proveedores" => Self::Suppliers,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Purchases => "/compras",
            Self::Stock => "/inventario/existencias",
            Self::Products => "/productos",
            Self::Warehouses => "/bodegas",
            Self::Suppliers => "/proveedores",
            Self::NotFound => "/404",
        }
    }

    /// 页面标题（侧边栏与顶栏）
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Ingresar",
            Self::Purchases => "Compras",
            Self::Stock => "Inventario / Existencias",
            Self::Products => "Productos",
            Self::Warehouses => "Bodegas",
            Self::Suppliers => "Proveedores",
            Self::NotFound => "Página no encontrada",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Purchases
    }

    /// 导航守卫
    pub fn guard(self, authenticated: bool) -> RouteDecision {
        if self.requires_auth() && !authenticated {
            RouteDecision::Redirect(Self::auth_failure_redirect())
        } else if self.should_redirect_when_authenticated() && authenticated {
            RouteDecision::Redirect(Self::auth_success_redirect())
        } else {
            RouteDecision::Allow(self)
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTECTED: [&str; 5] = [
        "/compras",
        "/inventario/existencias",
        "/productos",
        "/bodegas",
        "/proveedores",
    ];

    #[test]
    fn protected_routes_redirect_anonymous_users_to_login() {
        for path in PROTECTED {
            let route = AppRoute::from_path(path);
            assert_eq!(
                route.guard(false),
                RouteDecision::Redirect(AppRoute::Login),
                "{path}"
            );
        }
    }

    #[test]
    fn authenticated_users_reach_their_target() {
        for path in PROTECTED {
            let route = AppRoute::from_path(path);
            assert_eq!(route.guard(true), RouteDecision::Allow(route));
            assert_eq!(route.to_path(), path);
        }
    }

    #[test]
    fn login_page_bounces_authenticated_users() {
        assert_eq!(
            AppRoute::Login.guard(true),
            RouteDecision::Redirect(AppRoute::Purchases)
        );
        assert_eq!(AppRoute::Login.guard(false), RouteDecision::Allow(AppRoute::Login));
    }

    #[test]
    fn unknown_paths_are_public_not_found() {
        let route = AppRoute::from_path("/clientes");
        assert_eq!(route, AppRoute::NotFound);
        assert_eq!(route.guard(false).route(), AppRoute::NotFound);
    }

    #[test]
    fn trailing_slash_and_root() {
        assert_eq!(AppRoute::from_path("/productos/"), AppRoute::Products);
        assert_eq!(AppRoute::from_path("/"), AppRoute::Purchases);
        assert_eq!(AppRoute::from_path("/").guard(false).route(), AppRoute::Login);
    }
}
