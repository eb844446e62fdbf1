use std::cell::RefCell;
use std::rc::Rc;

use floorplan_core::Theme;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MediaQueryList, MediaQueryListEvent, Storage, Window};

use crate::constants::{DARK_SCHEME_QUERY, THEME_KEY, THEME_TOGGLE_ID};
use crate::state::State;
use crate::utils::{element_by_id, warn};

fn storage(window: &Window) -> Option<Storage> {
    window.local_storage().ok()?
}

/// Explicit theme choice saved by the toggle, if any.
pub fn saved_theme(window: &Window) -> Option<String> {
    storage(window)?.get_item(THEME_KEY).ok()?
}

fn save_theme(window: &Window, theme: Theme) {
    let Some(storage) = storage(window) else {
        warn("localStorage unavailable; theme choice not saved");
        return;
    };
    if storage.set_item(THEME_KEY, theme.as_str()).is_err() {
        warn("Failed to save theme choice");
    }
}

fn dark_scheme_query(window: &Window) -> Option<MediaQueryList> {
    window.match_media(DARK_SCHEME_QUERY).ok()?
}

pub fn initial_theme(window: &Window) -> Theme {
    let prefers_dark = dark_scheme_query(window).is_some_and(|q| q.matches());
    Theme::resolve_initial(saved_theme(window).as_deref(), prefers_dark)
}

/// Reflect the theme on `<html data-theme>` and on the toggle button.
pub fn apply_theme(state: &State) {
    if let Some(root) = state.document.document_element() {
        let _ = root.set_attribute("data-theme", state.theme.as_str());
    }
    if let Some(btn) = element_by_id::<HtmlElement>(&state.document, THEME_TOGGLE_ID) {
        let label = state.theme.toggle_label();
        let _ = btn.set_attribute("aria-label", &label);
        btn.set_title(&label);
    }
}

/// Wires the toggle button and follows OS scheme changes until the user
/// has picked a theme.
pub fn attach_theme(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let (doc, window) = {
        let s = state.borrow();
        (s.document.clone(), s.window.clone())
    };

    if let Some(btn) = element_by_id::<HtmlElement>(&doc, THEME_TOGGLE_ID) {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            s.theme = s.theme.toggled();
            save_theme(&s.window, s.theme);
            apply_theme(&s);
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    if let Some(query) = dark_scheme_query(&window) {
        let st = state.clone();
        let onchange =
            Closure::<dyn FnMut(MediaQueryListEvent)>::wrap(Box::new(move |e: MediaQueryListEvent| {
                let mut s = st.borrow_mut();
                let saved = saved_theme(&s.window);
                if let Some(theme) = Theme::follow_system(saved.as_deref(), e.matches()) {
                    s.theme = theme;
                    apply_theme(&s);
                }
            }));
        query.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }
    Ok(())
}
