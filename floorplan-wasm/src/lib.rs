use std::cell::RefCell;
use std::rc::Rc;

use floorplan_core::{Planner, RotateDirection};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, HtmlInputElement, MouseEvent, Window};

mod constants;
mod dnd;
mod render;
mod state;
mod theme;
mod utils;

use crate::constants::{
    CATALOG_QUERY_PARAM, CATEGORIES_ID, CHESS_ONLY_ID, DEFAULT_CATALOG_PATH, GRID_ID,
    HIDE_PLACED_CHESS_ID, RESET_LAYOUT_ID, ROOM_CARDS_ID, SEARCH_ID,
};
use crate::render::render;
use crate::state::{STATE, State};
use crate::utils::{
    asset_url, cell_index, closest_attr, element_by_id, error, event_element,
    fetch_text_with_fallbacks, get_query_param, log, warn,
};

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    // Grid: place the selected room, or the remove/rotate buttons of a cell
    if let Some(grid) = element_by_id::<HtmlElement>(&doc, GRID_ID) {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let Some(target) = event_element(&e) else {
                return;
            };
            let Some(index) = cell_index(&target) else {
                return;
            };
            let mut s = st.borrow_mut();
            let changed = match closest_attr(&target, "data-action").as_deref() {
                Some("remove") => s.planner.remove(index),
                Some("rotate") => match closest_attr(&target, "data-direction")
                    .unwrap_or_default()
                    .parse::<RotateDirection>()
                {
                    Ok(direction) => s.planner.rotate(index, direction),
                    Err(msg) => {
                        warn(&msg);
                        false
                    }
                },
                _ => s.planner.click_cell(index),
            };
            if changed {
                render(&s);
            }
        }));
        grid.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Room cards: select a room for placement
    if let Some(cards) = element_by_id::<HtmlElement>(&doc, ROOM_CARDS_ID) {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let Some(id) = event_element(&e).and_then(|el| closest_attr(&el, "data-room-id"))
            else {
                return;
            };
            let mut s = st.borrow_mut();
            if s.planner.select_room(&id) {
                render(&s);
            }
        }));
        cards.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Category buttons
    if let Some(categories) = element_by_id::<HtmlElement>(&doc, CATEGORIES_ID) {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let Some(category) =
                event_element(&e).and_then(|el| closest_attr(&el, "data-category"))
            else {
                return;
            };
            let mut s = st.borrow_mut();
            if s.planner.set_category(&category) {
                render(&s);
            }
        }));
        categories.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    // Search box
    if let Some(input) = element_by_id::<HtmlInputElement>(&doc, SEARCH_ID) {
        let st = state.clone();
        let input_for_closure = input.clone();
        let oninput = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
            let mut s = st.borrow_mut();
            s.planner.set_search(&input_for_closure.value());
            render(&s);
        }));
        input.set_oninput(Some(oninput.as_ref().unchecked_ref()));
        oninput.forget();
    }

    // Chess checkboxes
    for (id, toggle) in [
        (CHESS_ONLY_ID, Planner::toggle_chess_only as fn(&mut Planner)),
        (HIDE_PLACED_CHESS_ID, Planner::toggle_hide_placed_chess),
    ] {
        if let Some(input) = element_by_id::<HtmlInputElement>(&doc, id) {
            let st = state.clone();
            let onchange = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
                let mut s = st.borrow_mut();
                toggle(&mut s.planner);
                render(&s);
            }));
            input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
            onchange.forget();
        }
    }

    // Reset button (empties every non-fixed cell)
    if let Some(btn) = element_by_id::<HtmlElement>(&doc, RESET_LAYOUT_ID) {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            s.planner.reset_layout();
            render(&s);
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    Ok(())
}

/// Room data location: `?rooms=<path>` if given, else the bundled file.
fn catalog_path(window: &Window) -> String {
    window
        .location()
        .search()
        .ok()
        .and_then(|search| get_query_param(&search, CATALOG_QUERY_PARAM))
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string())
}

async fn fetch_and_load_catalog(window: Window, path: String) {
    let text = fetch_text_with_fallbacks(&window, &[&asset_url(&path), &path]).await;
    STATE.with(|st| {
        if let Some(st_rc) = st.borrow().as_ref() {
            let mut s = st_rc.borrow_mut();
            match text {
                Some(text) => match s.planner.load(&text) {
                    Ok(missing) => {
                        for name in missing {
                            warn(&format!("Room {name} not found in data."));
                        }
                        log(&format!("Loaded {} rooms", s.planner.catalog().len()));
                    }
                    Err(e) => error(&format!("Error loading room data: {e}")),
                },
                None => {
                    let msg = format!("could not fetch {path}");
                    error(&format!("Error loading room data: {msg}"));
                    s.planner.fail_load(msg);
                }
            }
            render(&s);
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let state = Rc::new(RefCell::new(State {
        theme: theme::initial_theme(&window),
        window: window.clone(),
        document,
        planner: Planner::default(),
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    theme::apply_theme(&state.borrow());
    theme::attach_theme(state.clone())?;
    attach_ui(state.clone())?;
    dnd::attach_drag_and_drop(state.clone())?;
    render(&state.borrow());

    // The only suspension point: rooms arrive once, then the page re-renders
    let path = catalog_path(&window);
    wasm_bindgen_futures::spawn_local(fetch_and_load_catalog(window, path));
    Ok(())
}
