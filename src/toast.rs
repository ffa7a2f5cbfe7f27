//! 全局通知通道模块
//!
//! 进程级单槽位的瞬时消息：任何组件都可以发布，同一时刻至多
//! 一条消息可见，新消息无条件替换旧消息（不排队）。
//! 展示后固定时长自动清除，计时从最近一次发布算起。

use leptos::prelude::*;

use gloo_timers::callback::Timeout;

/// 自动清除时长（毫秒）
pub const TOAST_DURATION_MS: u32 = 3000;

/// 消息严重级别，仅影响呈现
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
}

impl Severity {
    fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "toast-success",
            Severity::Error => "toast-error",
            Severity::Warning => "toast-warning",
        }
    }
}

/// 槽位内容
///
/// `seq` 单调递增，用于让过期的清除定时器失效：
/// 旧消息的定时器触发时若槽位已被替换，则什么也不做。
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub seq: u64,
}

/// 无条件替换槽位内容，序号自增
fn replace_slot(slot: &mut Option<Toast>, message: String, severity: Severity) {
    let seq = slot.as_ref().map_or(0, |t| t.seq + 1);
    *slot = Some(Toast {
        message,
        severity,
        seq,
    });
}

/// 定时器触发时是否应清除槽位
fn should_clear(slot: Option<&Toast>, fired_seq: u64) -> bool {
    slot.is_some_and(|t| t.seq == fired_seq)
}

/// 槽位对应的宿主 CSS 类；槽位为空时返回空串
///
/// 清除发生时该闭包可能先于 `<Show>` 的卸载重跑，空槽位必须可渲染。
fn slot_css_class(slot: Option<&Toast>) -> String {
    slot.map(|t| format!("toast {}", t.severity.css_class()))
        .unwrap_or_default()
}

/// 通知上下文
#[derive(Clone, Copy)]
pub struct ToastContext {
    slot: RwSignal<Option<Toast>>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            slot: RwSignal::new(None),
        }
    }

    /// 当前槽位内容（响应式读取）
    pub fn current(&self) -> Option<Toast> {
        self.slot.get()
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        self.slot.update(|slot| replace_slot(slot, message, severity));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(message, Severity::Warning);
    }

    /// 仅当槽位仍是 `seq` 对应的那条消息时清除
    fn clear_if(&self, seq: u64) {
        self.slot.update(|slot| {
            if should_clear(slot.as_ref(), seq) {
                *slot = None;
            }
        });
    }
}

impl Default for ToastContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取通知通道
pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// 通知宿主组件
///
/// 在应用根部渲染一次。每条消息出现时启动一个一次性定时器；
/// 被替换的消息留下的定时器因序号不匹配而成为空操作，
/// 所以可见时长总是从最新一次发布起算。
#[component]
pub fn ToastHost() -> impl IntoView {
    let toast = use_toast();

    Effect::new(move |_| {
        if let Some(current) = toast.current() {
            let seq = current.seq;
            Timeout::new(TOAST_DURATION_MS, move || toast.clear_if(seq)).forget();
        }
    });

    view! {
        <Show when=move || toast.current().is_some()>
            <div class="toast-overlay">
                <div class=move || slot_css_class(toast.current().as_ref())>
                    {move || toast.current().map(|t| t.message).unwrap_or_default()}
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================
    // 槽位替换语义
    // =========================================================

    #[test]
    fn test_show_replaces_previous_message() {
        let mut slot = None;
        replace_slot(&mut slot, "first".to_string(), Severity::Success);
        replace_slot(&mut slot, "second".to_string(), Severity::Error);

        let current = slot.as_ref().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.severity, Severity::Error);
    }

    #[test]
    fn test_seq_increases_on_each_publish() {
        let mut slot = None;
        replace_slot(&mut slot, "a".to_string(), Severity::Success);
        let first_seq = slot.as_ref().unwrap().seq;
        replace_slot(&mut slot, "b".to_string(), Severity::Success);
        let second_seq = slot.as_ref().unwrap().seq;

        assert!(second_seq > first_seq);
    }

    #[test]
    fn test_stale_timer_does_not_clear_newer_message() {
        let mut slot = None;
        replace_slot(&mut slot, "first".to_string(), Severity::Success);
        let first_seq = slot.as_ref().unwrap().seq;
        replace_slot(&mut slot, "second".to_string(), Severity::Success);
        let second_seq = slot.as_ref().unwrap().seq;

        // 第一条消息的定时器触发：槽位已被替换，不清除
        assert!(!should_clear(slot.as_ref(), first_seq));
        // 第二条消息的定时器触发：正常清除
        assert!(should_clear(slot.as_ref(), second_seq));
    }

    #[test]
    fn test_timer_on_empty_slot_is_noop() {
        assert!(!should_clear(None, 0));
    }

    // =========================================================
    // 宿主 CSS 类
    // =========================================================

    #[test]
    fn test_css_class_tolerates_cleared_slot() {
        let mut slot = None;
        assert_eq!(slot_css_class(slot.as_ref()), "");

        replace_slot(&mut slot, "boom".to_string(), Severity::Error);
        assert_eq!(slot_css_class(slot.as_ref()), "toast toast-error");

        // 清除后再次求值不应恐慌
        slot = None;
        assert_eq!(slot_css_class(slot.as_ref()), "");
    }
}
