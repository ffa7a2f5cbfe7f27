use super::*;

// =========================================================
// 路径解析
// =========================================================

#[test]
fn test_from_path_known_routes() {
    assert_eq!(AppRoute::from_path("/products"), AppRoute::Products);
    assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
    assert_eq!(AppRoute::from_path("/register"), AppRoute::Register);
    assert_eq!(AppRoute::from_path("/cart"), AppRoute::Cart);
    assert_eq!(AppRoute::from_path("/orders"), AppRoute::Orders);
    assert_eq!(AppRoute::from_path("/admin/orders"), AppRoute::AdminOrders);
    assert_eq!(AppRoute::from_path("/admin/refunds"), AppRoute::AdminRefunds);
    assert_eq!(AppRoute::from_path("/admin/returns"), AppRoute::AdminReturns);
}

#[test]
fn test_root_and_unknown_paths_fall_back_to_catalog() {
    assert_eq!(AppRoute::from_path("/"), AppRoute::Products);
    assert_eq!(AppRoute::from_path("/no-such-page"), AppRoute::Products);
    assert_eq!(AppRoute::from_path(""), AppRoute::Products);
}

#[test]
fn test_path_round_trip() {
    for route in [
        AppRoute::Products,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::Cart,
        AppRoute::Orders,
        AppRoute::AdminOrders,
        AppRoute::AdminRefunds,
        AppRoute::AdminReturns,
    ] {
        assert_eq!(AppRoute::from_path(route.to_path()), route);
    }
}

// =========================================================
// 角色要求
// =========================================================

#[test]
fn test_required_roles() {
    assert_eq!(AppRoute::Products.required_role(), None);
    assert_eq!(AppRoute::Login.required_role(), None);
    assert_eq!(AppRoute::Register.required_role(), None);
    assert_eq!(AppRoute::Cart.required_role(), Some(Role::User));
    assert_eq!(AppRoute::Orders.required_role(), Some(Role::User));
    assert_eq!(AppRoute::AdminOrders.required_role(), Some(Role::Admin));
    assert_eq!(AppRoute::AdminRefunds.required_role(), Some(Role::Admin));
    assert_eq!(AppRoute::AdminReturns.required_role(), Some(Role::Admin));
}

// =========================================================
// 守卫判定
// =========================================================

#[test]
fn test_guard_without_token_redirects_to_login() {
    assert_eq!(
        guard(AppRoute::Cart, false, None),
        GuardOutcome::RedirectLogin
    );
    assert_eq!(
        guard(AppRoute::AdminOrders, false, None),
        GuardOutcome::RedirectLogin
    );
}

#[test]
fn test_guard_wrong_role_redirects_to_catalog() {
    // USER 访问 ADMIN 路由
    assert_eq!(
        guard(AppRoute::AdminOrders, true, Some(Role::User)),
        GuardOutcome::RedirectCatalog
    );
    // ADMIN 访问 USER 路由
    assert_eq!(
        guard(AppRoute::Cart, true, Some(Role::Admin)),
        GuardOutcome::RedirectCatalog
    );
    // 有凭证但角色缺失
    assert_eq!(
        guard(AppRoute::Orders, true, None),
        GuardOutcome::RedirectCatalog
    );
}

#[test]
fn test_guard_matching_role_allows() {
    assert_eq!(
        guard(AppRoute::AdminOrders, true, Some(Role::Admin)),
        GuardOutcome::Allow
    );
    assert_eq!(
        guard(AppRoute::Cart, true, Some(Role::User)),
        GuardOutcome::Allow
    );
}

#[test]
fn test_public_routes_bypass_guard() {
    for route in [AppRoute::Products, AppRoute::Login, AppRoute::Register] {
        assert_eq!(guard(route, false, None), GuardOutcome::Allow);
        assert_eq!(guard(route, true, Some(Role::Admin)), GuardOutcome::Allow);
    }
}
