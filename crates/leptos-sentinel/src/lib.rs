//! Leptos Sentinel Utilities
//!
//! Watches the last rendered element of a list with an IntersectionObserver.
//! Only one element is observed at a time: when the last element changes the
//! old target is dropped before the new one is observed.

use leptos::html::Div;
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// What has to happen to the observed element after the last key changed
#[derive(Clone, Debug, PartialEq)]
pub enum Retarget<K> {
    /// Same element as before
    Unchanged,
    /// Nothing was observed, start observing
    Attach,
    /// Stop observing the previous key, observe the new one
    Swap(K),
    /// List became empty, stop observing the previous key
    Detach(K),
}

/// Key of the element currently under observation
#[derive(Clone, Debug, PartialEq)]
pub struct SentinelSlot<K> {
    current: Option<K>,
}

impl<K> Default for SentinelSlot<K> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<K: PartialEq> SentinelSlot<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the slot to `next` and report the transition
    pub fn retarget(&mut self, next: Option<K>) -> Retarget<K> {
        if self.current == next {
            return Retarget::Unchanged;
        }
        let attaching = next.is_some();
        match (std::mem::replace(&mut self.current, next), attaching) {
            (None, _) => Retarget::Attach,
            (Some(previous), true) => Retarget::Swap(previous),
            (Some(previous), false) => Retarget::Detach(previous),
        }
    }
}

type EntriesCallback = Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>;

/// Owns one IntersectionObserver and the callback it fires
pub struct SentinelObserver<K> {
    observer: web_sys::IntersectionObserver,
    _callback: EntriesCallback,
    slot: SentinelSlot<K>,
}

impl<K: PartialEq> SentinelObserver<K> {
    /// `on_visible` runs every time the watched element enters the viewport
    pub fn new(on_visible: impl Fn() + 'static) -> Result<Self, wasm_bindgen::JsValue> {
        let on_visible = Rc::new(on_visible);
        let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
                let intersecting = entries.iter().any(|entry| {
                    entry
                        .unchecked_into::<web_sys::IntersectionObserverEntry>()
                        .is_intersecting()
                });
                if intersecting {
                    on_visible();
                }
            },
        );
        let observer = web_sys::IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
        Ok(Self {
            observer,
            _callback: callback,
            slot: SentinelSlot::new(),
        })
    }

    /// Point the observer at `element`, identified by `key`
    ///
    /// A missing element counts as an empty list.
    pub fn watch(&mut self, key: Option<K>, element: Option<&web_sys::Element>) {
        let key = element.and(key);
        match self.slot.retarget(key) {
            Retarget::Unchanged => {}
            Retarget::Attach => {
                if let Some(el) = element {
                    self.observer.observe(el);
                }
            }
            Retarget::Swap(_) => {
                self.observer.disconnect();
                if let Some(el) = element {
                    self.observer.observe(el);
                }
            }
            Retarget::Detach(_) => self.observer.disconnect(),
        }
    }
}

impl<K> Drop for SentinelObserver<K> {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// The list has a last item whose element is not in the DOM yet
fn awaiting_render<K>(key: &Option<K>, rendered: bool) -> bool {
    key.is_some() && !rendered
}

/// Observe the last child of `container`
///
/// `last_key` identifies the last rendered item; the observer is moved
/// whenever it changes. The observer is dropped (and disconnected) with the
/// owning component.
pub fn use_last_child_sentinel<K, F, V>(container: NodeRef<Div>, last_key: F, on_visible: V)
where
    K: PartialEq + 'static,
    F: Fn() -> Option<K> + 'static,
    V: Fn() + 'static,
{
    let observer = match SentinelObserver::<K>::new(on_visible) {
        Ok(observer) => StoredValue::new_local(Some(observer)),
        Err(e) => {
            web_sys::console::error_1(&e);
            return;
        }
    };

    let last_key = Rc::new(last_key);
    Effect::new(move |_| {
        let key = last_key();
        let element = container.get().and_then(|list| list.last_element_child());
        if awaiting_render(&key, element.is_some()) {
            // look again once the list has rendered
            let last_key = Rc::clone(&last_key);
            let retry = Closure::once_into_js(move || {
                let key = untrack(|| last_key());
                let element = container
                    .try_get_untracked()
                    .flatten()
                    .and_then(|list| list.last_element_child());
                observer.try_update_value(|slot| {
                    if let Some(observer) = slot {
                        observer.watch(key, element.as_ref());
                    }
                });
            });
            if let Some(win) = web_sys::window() {
                let _ = win.request_animation_frame(retry.unchecked_ref());
            }
            return;
        }
        observer.update_value(|slot| {
            if let Some(observer) = slot {
                observer.watch(key, element.as_ref());
            }
        });
    });
}
