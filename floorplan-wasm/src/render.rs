use floorplan_core::planner::LOADING_MESSAGE;
use floorplan_core::{CellView, LoadState, PlannerView, RoomCardView};
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::constants::{
    CATEGORIES_ID, CHESS_ONLY_ID, CHESS_PIECES_ID, GRID_ID, HIDE_PLACED_CHESS_ID, ROOM_CARDS_ID,
    SEARCH_ID,
};
use crate::state::State;
use crate::utils::{css_url, element_by_id, escape_html};

/// Rewrite every dynamic part of the page from the current planner snapshot.
pub fn render(state: &State) {
    let view = state.planner.view();
    let doc = &state.document;
    render_grid(doc, &view);
    render_chess_pieces(doc, &view);
    render_filters(doc, &view);
    render_room_cards(doc, &view);
}

pub fn cell_class(cell: &CellView) -> String {
    let mut class = String::from("cell");
    if cell.room.is_some() {
        class.push_str(" has-room");
    }
    if cell.fixed {
        class.push_str(" fixed");
    }
    if cell.drag_over {
        class.push_str(" drag-over");
    }
    class
}

pub fn cell_dom_id(index: usize) -> String {
    format!("cell-{index}")
}

/// Refresh only the drag highlight of cells `indices`. The grid is not
/// rebuilt while a drag is in flight so the drop target stays in the DOM.
pub fn render_drag_highlight(state: &State, indices: &[Option<usize>]) {
    let view = state.planner.view();
    for index in indices.iter().flatten() {
        if let Some(cell) = view.cells.get(*index)
            && let Some(el) = state.document.get_element_by_id(&cell_dom_id(*index))
        {
            el.set_class_name(&cell_class(cell));
        }
    }
}

fn render_grid(doc: &Document, view: &PlannerView) {
    let Some(grid) = element_by_id::<HtmlElement>(doc, GRID_ID) else {
        return;
    };
    let mut html = String::new();
    for cell in &view.cells {
        let mut style = format!("--rotation:{}deg;", cell.rotation);
        if let Some(url) = cell.room.as_ref().and_then(|r| r.image_url.as_deref()) {
            style.push_str(&format!(
                "background-image:url('{}');",
                escape_html(&css_url(url))
            ));
        }
        html.push_str(&format!(
            "<div id=\"{}\" class=\"{}\" data-index=\"{}\" data-row=\"{}\" data-column=\"{}\" style=\"{}\">",
            cell_dom_id(cell.index),
            cell_class(cell),
            cell.index,
            cell.row,
            cell.column,
            style,
        ));
        match &cell.room {
            Some(room) => {
                if let Some(label) = &room.chess_label {
                    html.push_str(&format!("<span class=\"chess\">{}</span>", escape_html(label)));
                }
                html.push_str(&format!(
                    "<span class=\"room-name\">{}</span>",
                    escape_html(&room.name)
                ));
                if !cell.fixed {
                    html.push_str(
                        "<button class=\"remove\" data-action=\"remove\" title=\"Remove room\">×</button>\
                         <button class=\"rotate-left\" data-action=\"rotate\" data-direction=\"left\" title=\"Rotate counterclockwise\">↺</button>\
                         <button class=\"rotate-right\" data-action=\"rotate\" data-direction=\"right\" title=\"Rotate clockwise\">↻</button>",
                    );
                }
            }
            None => html.push_str("<span class=\"room-name empty\">Empty Cell</span>"),
        }
        html.push_str("</div>");
    }
    grid.set_inner_html(&html);
}

fn render_chess_pieces(doc: &Document, view: &PlannerView) {
    let Some(el) = element_by_id::<HtmlElement>(doc, CHESS_PIECES_ID) else {
        return;
    };
    let mut html = String::new();
    for entry in &view.chess {
        let class = if entry.available { "piece available" } else { "piece missing" };
        html.push_str(&format!(
            "<span class=\"{}\" title=\"{}\">{}</span>",
            class,
            entry.piece.name(),
            entry.symbol
        ));
    }
    el.set_inner_html(&html);
}

fn render_filters(doc: &Document, view: &PlannerView) {
    if let Some(el) = element_by_id::<HtmlElement>(doc, CATEGORIES_ID) {
        let mut html = String::new();
        for category in &view.categories {
            html.push_str(&format!(
                "<button class=\"category{}\" data-category=\"{}\">{}</button>",
                if category.selected { " selected" } else { "" },
                escape_html(&category.value),
                escape_html(&category.label),
            ));
        }
        el.set_inner_html(&html);
    }
    // Only push the value back when it differs, so typing keeps its caret.
    if let Some(input) = element_by_id::<HtmlInputElement>(doc, SEARCH_ID)
        && input.value() != view.search
    {
        input.set_value(&view.search);
    }
    if let Some(input) = element_by_id::<HtmlInputElement>(doc, CHESS_ONLY_ID) {
        input.set_checked(view.chess_only);
    }
    if let Some(input) = element_by_id::<HtmlInputElement>(doc, HIDE_PLACED_CHESS_ID) {
        input.set_checked(view.hide_placed_chess);
    }
}

fn render_room_cards(doc: &Document, view: &PlannerView) {
    let Some(el) = element_by_id::<HtmlElement>(doc, ROOM_CARDS_ID) else {
        return;
    };
    let html = match &view.load_state {
        LoadState::Loading => format!("<div class=\"loading\">{LOADING_MESSAGE}</div>"),
        LoadState::Failed(msg) => format!(
            "<div class=\"loading failed\">Could not load rooms: {}</div>",
            escape_html(msg)
        ),
        LoadState::Ready => {
            let mut html: String = view.rooms.iter().map(room_card_html).collect();
            if let Some(msg) = view.empty_message {
                html.push_str(&format!("<div class=\"empty\">{msg}</div>"));
            }
            html
        }
    };
    el.set_inner_html(&html);
}

fn room_card_html(room: &RoomCardView) -> String {
    let mut class = String::from("room-card");
    if room.selected {
        class.push_str(" selected");
    }
    if room.placed {
        class.push_str(" disabled");
    }
    let image = room
        .image_url
        .as_deref()
        .map(|url| format!("<img src=\"{}\" alt=\"\">", escape_html(url)))
        .unwrap_or_default();
    let chess = room
        .chess
        .as_deref()
        .map(|c| format!("<span class=\"chess\">♟ {}</span>", escape_html(c)))
        .unwrap_or_default();
    format!(
        "<div class=\"{}\" data-room-id=\"{}\" draggable=\"{}\">{}<span class=\"room-name\">{}</span>{}</div>",
        class,
        escape_html(&room.id),
        !room.placed,
        image,
        escape_html(&room.name),
        chess,
    )
}
