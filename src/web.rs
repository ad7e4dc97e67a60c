//! Browser host: binds the reminder to page markup and `localStorage`.
//!
//! Expected markup:
//!
//! ```html
//! <div id="reminder-popup" class="hidden">
//!   <button id="remind-now">Remind me later</button>
//!   <button id="dismiss-reminder">Dismiss for today</button>
//! </div>
//! ```

use crate::clock::SystemClock;
use crate::reminder::{Policy, Popup, Reminder};
use crate::store::KeyValueStore;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

pub const POPUP_ID:        &str = "reminder-popup";
pub const REMIND_LATER_ID: &str = "remind-now";
pub const DISMISS_ID:      &str = "dismiss-reminder";
pub const HIDDEN_CLASS:    &str = "hidden";

// ── localStorage ──────────────────────────────────────────────────────

/// `window.localStorage`. Storage that is disabled or full behaves as empty.
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(s) = Self::storage() {
            let _ = s.set_item(key, value);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(s) = Self::storage() {
            let _ = s.remove_item(key);
        }
    }
}

// ── DOM popup ─────────────────────────────────────────────────────────

/// Visibility is the absence of the `hidden` class.
pub struct DomPopup {
    element: Element,
}

impl Popup for DomPopup {
    fn reveal(&mut self) {
        let _ = self.element.class_list().remove_1(HIDDEN_CLASS);
    }

    fn conceal(&mut self) {
        let _ = self.element.class_list().add_1(HIDDEN_CLASS);
    }

    fn is_visible(&self) -> bool {
        !self.element.class_list().contains(HIDDEN_CLASS)
    }
}

type PageReminder = Reminder<LocalStorage, SystemClock, DomPopup>;

struct ElementIds {
    popup:        String,
    remind_later: String,
    dismiss:      String,
}

// ── Entry points ──────────────────────────────────────────────────────

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

    if let Err(e) = init_with_ids(POPUP_ID, REMIND_LATER_ID, DISMISS_ID) {
        log::warn!("reminder not installed: {:?}", e);
    }
}

/// Install the reminder against custom element ids. Runs once the document
/// has been parsed.
#[wasm_bindgen]
pub fn init_with_ids(popup_id: &str, remind_later_id: &str, dismiss_id: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let ids = ElementIds {
        popup:        popup_id.to_string(),
        remind_later: remind_later_id.to_string(),
        dismiss:      dismiss_id.to_string(),
    };

    if document.ready_state() != "loading" {
        return attach(&document, &ids);
    }

    let doc = document.clone();
    let on_ready = Closure::once(move || {
        if let Err(e) = attach(&doc, &ids) {
            log::warn!("reminder not installed: {:?}", e);
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

fn attach(document: &Document, ids: &ElementIds) -> Result<(), JsValue> {
    let (Some(popup), Some(later), Some(dismiss)) = (
        document.get_element_by_id(&ids.popup),
        document.get_element_by_id(&ids.remind_later),
        document.get_element_by_id(&ids.dismiss),
    ) else {
        log::warn!(
            "reminder markup missing (#{}, #{}, #{})",
            ids.popup, ids.remind_later, ids.dismiss
        );
        return Ok(());
    };

    let reminder = Rc::new(RefCell::new(Reminder::new(
        LocalStorage,
        SystemClock,
        DomPopup { element: popup },
        Policy::default(),
    )));

    let outcome = reminder.borrow_mut().evaluate_and_maybe_show();
    log::debug!("reminder evaluated on load: {:?}", outcome);

    on_click(&later, Rc::clone(&reminder), PageReminder::remind_later)?;
    on_click(&dismiss, reminder, PageReminder::dismiss)?;
    Ok(())
}

fn on_click(
    target: &Element,
    reminder: Rc<RefCell<PageReminder>>,
    action: fn(&mut PageReminder),
) -> Result<(), JsValue> {
    let handler = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        action(&mut reminder.borrow_mut());
    });
    target.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
