//! 商品目录页组件
//!
//! 匿名可浏览；加购物车要求已登录，数量选择在 [1, 库存] 内摆动。
//! 管理员在同一页面看到的是库存增补控件而不是加购按钮。
//! 库存数值通过对商品列表信号的查找渲染，补货后重新加载即生效。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::navbar::Navbar;
use crate::model::Product;
use crate::session::{Role, use_api_failure, use_session};
use crate::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

/// 购买数量步进，始终停留在 [1, 库存] 区间内
fn step_quantity(current: u32, delta: i32, stock: u32) -> u32 {
    let next = current as i64 + delta as i64;
    next.clamp(1, stock.max(1) as i64) as u32
}

/// 库存增补数量步进，下界为 0
fn step_stock_input(current: u32, delta: i32) -> u32 {
    (current as i64 + delta as i64).max(0) as u32
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let session = use_session();
    let navigate = use_navigate();
    let on_failure = use_api_failure();

    let (products, set_products) = signal(Vec::<Product>::new());

    let role = session.role;
    let has_token = session.has_token_signal();
    let is_admin = move || role.get() == Some(Role::Admin);

    let load = move || async move {
        match api.products().await {
            Ok(list) => set_products.set(list),
            Err(err) => on_failure(err, "Failed to load products"),
        }
    };
    Effect::new(move |_| spawn_local(load()));

    let require_login = move || {
        toast.error("Please login to continue");
        navigate(AppRoute::Login);
    };

    view! {
        <Navbar />

        <div class=move || {
            if is_admin() { "page admin-products-page" } else { "page" }
        }>
            <h2>"Products"</h2>

            <For each=move || products.get() key=|p| p.id let:product>
                {
                    let id = product.id;
                    let name = product.name.clone();
                    let qty = RwSignal::new(1u32);
                    let stock_input = RwSignal::new(0u32);

                    // 库存从列表信号查找，补货重载后这一行自动更新
                    let stock = move || {
                        products
                            .get()
                            .iter()
                            .find(|p| p.id == id)
                            .map(|p| p.stock)
                            .unwrap_or(0)
                    };

                    let inc = move |_| {
                        if !has_token.get_untracked() {
                            require_login();
                            return;
                        }
                        let limit = stock();
                        qty.update(|q| *q = step_quantity(*q, 1, limit));
                    };

                    let dec = move |_| {
                        if !has_token.get_untracked() {
                            require_login();
                            return;
                        }
                        let limit = stock();
                        qty.update(|q| *q = step_quantity(*q, -1, limit));
                    };

                    let on_add = move |_| {
                        if !has_token.get_untracked() {
                            require_login();
                            return;
                        }
                        let quantity = qty.get_untracked();
                        spawn_local(async move {
                            match api.add_to_cart(id, quantity).await {
                                Ok(()) => toast.success("Added to cart"),
                                Err(err) => on_failure(err, "Failed to add to cart"),
                            }
                        });
                    };

                    let on_update_stock = move |_| {
                        let quantity = stock_input.get_untracked();
                        if quantity == 0 {
                            toast.warning("Stock value must be greater than 0");
                            return;
                        }
                        spawn_local(async move {
                            match api.update_stock(id, quantity).await {
                                Ok(()) => {
                                    toast.success("Stock updated");
                                    stock_input.set(0);
                                    load().await;
                                }
                                Err(err) => on_failure(err, "Failed to update stock"),
                            }
                        });
                    };

                    view! {
                        <div class="product-card products-layout">
                            <div class="product-left">
                                {product
                                    .image_url
                                    .clone()
                                    .map(|url| {
                                        view! {
                                            <img
                                                src=url
                                                alt=name.clone()
                                                class="product-image"
                                            />
                                        }
                                    })}

                                <p class=move || {
                                    if stock() > 0 { "stock in-stock" } else { "stock out-stock" }
                                }>
                                    {move || {
                                        let s = stock();
                                        if s > 0 {
                                            format!("In stock : {}", s)
                                        } else {
                                            "Out of stock".to_string()
                                        }
                                    }}
                                </p>

                                <Show when=move || !is_admin()>
                                    <div class="user-qty">
                                        <button on:click=dec>"−"</button>
                                        <strong>{move || qty.get()}</strong>
                                        <button on:click=inc>"+"</button>
                                    </div>
                                </Show>

                                <Show when=is_admin>
                                    <div class="admin-stock-row">
                                        <strong>"Add stock"</strong>
                                        <button on:click=move |_| {
                                            stock_input.update(|v| *v = step_stock_input(*v, -1))
                                        }>"−"</button>
                                        <span>{move || stock_input.get()}</span>
                                        <button on:click=move |_| {
                                            stock_input.update(|v| *v = step_stock_input(*v, 1))
                                        }>"+"</button>
                                    </div>
                                </Show>
                            </div>

                            <div class="product-right">
                                <div class="product-title">
                                    {product.name.clone()}
                                    {product
                                        .color
                                        .clone()
                                        .map(|color| {
                                            view! {
                                                <span class="product-color">
                                                    " (" {color} ")"
                                                </span>
                                            }
                                        })}
                                </div>

                                <div class="product-specs">
                                    {product.ram.clone().map(|v| view! { <div>"• RAM: " {v}</div> })}
                                    {product
                                        .storage
                                        .clone()
                                        .map(|v| view! { <div>"• Storage: " {v}</div> })}
                                    {product
                                        .display
                                        .clone()
                                        .map(|v| view! { <div>"• Display: " {v}</div> })}
                                    {product
                                        .camera
                                        .clone()
                                        .map(|v| view! { <div>"• Camera: " {v}</div> })}
                                    {product
                                        .processor
                                        .clone()
                                        .map(|v| view! { <div>"• Processor: " {v}</div> })}
                                </div>

                                <div class="product-price-lg">{format!("₹{}", product.price)}</div>

                                <Show when=move || !is_admin()>
                                    <button
                                        class="add-cart-btn small"
                                        disabled=move || stock() == 0
                                        on:click=on_add
                                    >
                                        "Add to Cart"
                                    </button>
                                </Show>

                                <Show when=is_admin>
                                    <button class="add-cart-btn wide" on:click=on_update_stock>
                                        "Update Stock"
                                    </button>
                                </Show>
                            </div>
                        </div>
                    }
                }
            </For>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_clamped_to_stock_range() {
        assert_eq!(step_quantity(1, 1, 5), 2);
        assert_eq!(step_quantity(5, 1, 5), 5);
        assert_eq!(step_quantity(2, -1, 5), 1);
        assert_eq!(step_quantity(1, -1, 5), 1);
    }

    #[test]
    fn test_quantity_stays_at_one_for_empty_stock() {
        assert_eq!(step_quantity(1, 1, 0), 1);
        assert_eq!(step_quantity(1, -1, 0), 1);
    }

    #[test]
    fn test_stock_input_floors_at_zero() {
        assert_eq!(step_stock_input(0, -1), 0);
        assert_eq!(step_stock_input(0, 1), 1);
        assert_eq!(step_stock_input(3, -1), 2);
    }
}
