use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, HtmlElement};

use crate::constants::{DRAG_FORMAT, GRID_ID, ROOM_CARDS_ID};
use crate::render::{render, render_drag_highlight};
use crate::state::State;
use crate::utils::{cell_index, closest_attr, element_by_id, error, event_element};

/// Wires drag-and-drop between the room cards and the grid cells.
pub fn attach_drag_and_drop(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    if let Some(cards) = element_by_id::<HtmlElement>(&doc, ROOM_CARDS_ID) {
        let st = state.clone();
        let ondragstart = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |e: DragEvent| {
            let Some(id) = event_element(&e).and_then(|el| closest_attr(&el, "data-room-id"))
            else {
                return;
            };
            let payload = st.borrow().planner.drag_start(&id);
            match (payload, e.data_transfer()) {
                (Some(payload), Some(dt)) => {
                    if let Err(err) = dt.set_data(DRAG_FORMAT, &payload) {
                        error(&format!("Error starting drag: {err:?}"));
                        e.prevent_default();
                        return;
                    }
                    dt.set_effect_allowed("move");
                }
                // Placed rooms cannot be dragged again.
                _ => e.prevent_default(),
            }
        }));
        cards.set_ondragstart(Some(ondragstart.as_ref().unchecked_ref()));
        ondragstart.forget();
    }

    let Some(grid) = element_by_id::<HtmlElement>(&doc, GRID_ID) else {
        return Ok(());
    };

    let st = state.clone();
    let ondragover = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |e: DragEvent| {
        let Some(index) = event_element(&e).and_then(|el| cell_index(&el)) else {
            return;
        };
        let mut s = st.borrow_mut();
        let previous = s.planner.drag_over_index();
        if !s.planner.drag_over(index) {
            return;
        }
        // Accept the drop.
        e.prevent_default();
        if let Some(dt) = e.data_transfer() {
            dt.set_drop_effect("move");
        }
        if previous != Some(index) {
            render_drag_highlight(&s, &[previous, Some(index)]);
        }
    }));
    grid.set_ondragover(Some(ondragover.as_ref().unchecked_ref()));
    ondragover.forget();

    let st = state.clone();
    let ondragleave = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |_e: DragEvent| {
        let mut s = st.borrow_mut();
        let previous = s.planner.drag_over_index();
        s.planner.drag_leave();
        render_drag_highlight(&s, &[previous]);
    }));
    grid.set_ondragleave(Some(ondragleave.as_ref().unchecked_ref()));
    ondragleave.forget();

    let st = state.clone();
    let ondrop = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |e: DragEvent| {
        e.prevent_default();
        let Some(index) = event_element(&e).and_then(|el| cell_index(&el)) else {
            return;
        };
        let payload = e
            .data_transfer()
            .and_then(|dt| dt.get_data(DRAG_FORMAT).ok())
            .unwrap_or_default();
        let mut s = st.borrow_mut();
        if let Err(err) = s.planner.drop_payload(index, &payload) {
            error(&format!("Error dropping room: {err}"));
        }
        render(&s);
    }));
    grid.set_ondrop(Some(ondrop.as_ref().unchecked_ref()));
    ondrop.forget();

    Ok(())
}
