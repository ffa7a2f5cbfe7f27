//! 购物车页组件
//!
//! 勾选集合是纯客户端状态；结算只发送被勾选条目的 id。
//! 数量修改期间该行按钮禁用，防止同一条目的并发更新。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::navbar::Navbar;
use crate::model::{CartItem, CheckoutRequest};
use crate::session::use_api_failure;
use crate::toast::use_toast;

/// 数量步进结果；目标越过下界 1 时返回 None，不发请求
fn stepped_quantity(current: u32, delta: i32) -> Option<u32> {
    let next = current as i64 + delta as i64;
    (next >= 1).then_some(next as u32)
}

/// 勾选集为空时结算按钮不应发请求
fn can_checkout(selected: &[u64]) -> bool {
    !selected.is_empty()
}

fn toggle_selection(selected: &mut Vec<u64>, id: u64) {
    if let Some(pos) = selected.iter().position(|x| *x == id) {
        selected.remove(pos);
    } else {
        selected.push(id);
    }
}

#[component]
pub fn CartPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let on_failure = use_api_failure();

    let (items, set_items) = signal(Vec::<CartItem>::new());
    let selected = RwSignal::new(Vec::<u64>::new());
    let loading_id = RwSignal::new(None::<u64>);

    let load = move || async move {
        match api.cart().await {
            Ok(list) => {
                // 已经不在购物车里的条目同时移出勾选集
                selected.update(|sel| sel.retain(|id| list.iter().any(|item| item.id == *id)));
                set_items.set(list);
            }
            Err(err) => on_failure(err, "Failed to load cart"),
        }
    };
    Effect::new(move |_| spawn_local(load()));

    let change_quantity = move |item_id: u64, current: u32, delta: i32| {
        let Some(next) = stepped_quantity(current, delta) else {
            return;
        };
        loading_id.set(Some(item_id));
        spawn_local(async move {
            match api.update_cart_quantity(item_id, next).await {
                Ok(()) => {
                    load().await;
                    toast.success("Quantity updated");
                }
                Err(err) => on_failure(err, "Quantity update failed"),
            }
            loading_id.set(None);
        });
    };

    let remove_item = move |item_id: u64| {
        spawn_local(async move {
            match api.remove_cart_item(item_id).await {
                Ok(()) => {
                    load().await;
                    toast.success("Item removed from cart");
                }
                Err(err) => on_failure(err, "Remove failed"),
            }
        });
    };

    let on_checkout = move |_| {
        let ids = selected.get_untracked();
        if !can_checkout(&ids) {
            toast.warning("Select items to checkout");
            return;
        }
        spawn_local(async move {
            match api.checkout(&CheckoutRequest { cart_item_ids: ids }).await {
                Ok(()) => {
                    selected.set(Vec::new());
                    load().await;
                    toast.success("Order placed successfully");
                }
                Err(err) => on_failure(err, "Checkout failed"),
            }
        });
    };

    view! {
        <Navbar />

        <div class="page">
            <h2>"Cart"</h2>

            <Show when=move || items.with(|i| i.is_empty())>
                <p class="empty">"Your cart is empty"</p>
            </Show>

            <For each=move || items.get() key=|item| item.id let:item>
                {
                    let item_id = item.id;
                    let name = item.product.name.clone();

                    // 数量从列表信号查找，更新重载后这一行自动刷新
                    let quantity = move || {
                        items
                            .get()
                            .iter()
                            .find(|i| i.id == item_id)
                            .map(|i| i.quantity)
                            .unwrap_or(0)
                    };
                    let busy = move || loading_id.get() == Some(item_id);

                    view! {
                        <div class="cart-card">
                            <div class="cart-row">
                                <div class="cart-left">
                                    <input
                                        type="checkbox"
                                        class="cart-checkbox"
                                        prop:checked=move || {
                                            selected.with(|sel| sel.contains(&item_id))
                                        }
                                        on:change=move |_| {
                                            selected.update(|sel| toggle_selection(sel, item_id))
                                        }
                                    />

                                    <div class="cart-info">
                                        <div class="cart-product-name">{name}</div>

                                        <div class="qty-controls">
                                            <button
                                                disabled=busy
                                                on:click=move |_| {
                                                    change_quantity(item_id, quantity(), -1)
                                                }
                                            >
                                                "−"
                                            </button>

                                            <span class="qty-value">{quantity}</span>

                                            <button
                                                disabled=busy
                                                on:click=move |_| {
                                                    change_quantity(item_id, quantity(), 1)
                                                }
                                            >
                                                "+"
                                            </button>
                                        </div>
                                    </div>
                                </div>

                                <button class="remove-btn" on:click=move |_| remove_item(item_id)>
                                    "Remove"
                                </button>
                            </div>
                        </div>
                    }
                }
            </For>

            <Show when=move || items.with(|i| !i.is_empty())>
                <button class="checkout-btn" on:click=on_checkout>
                    "Checkout Selected"
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================
    // 数量步进下界
    // =========================================================

    #[test]
    fn test_decrement_below_one_is_suppressed() {
        assert_eq!(stepped_quantity(1, -1), None);
        assert_eq!(stepped_quantity(2, -1), Some(1));
    }

    #[test]
    fn test_increment_has_no_client_upper_bound() {
        assert_eq!(stepped_quantity(1, 1), Some(2));
        assert_eq!(stepped_quantity(99, 1), Some(100));
    }

    // =========================================================
    // 结算前置条件
    // =========================================================

    #[test]
    fn test_checkout_requires_selection() {
        assert!(!can_checkout(&[]));
        assert!(can_checkout(&[7]));
    }

    #[test]
    fn test_toggle_selection_round_trip() {
        let mut sel = vec![1, 2];
        toggle_selection(&mut sel, 3);
        assert_eq!(sel, vec![1, 2, 3]);
        toggle_selection(&mut sel, 2);
        assert_eq!(sel, vec![1, 3]);
    }
}
