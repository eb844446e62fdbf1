use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

pub fn warn(s: &str) {
    web_sys::console::warn_1(&JsValue::from_str(s));
}

pub fn error(s: &str) {
    web_sys::console::error_1(&JsValue::from_str(s));
}

/// Look up an element by id and cast it, or `None` if missing or of another type.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Element an event was dispatched on.
pub fn event_element(e: &web_sys::Event) -> Option<Element> {
    e.target()?.dyn_into::<Element>().ok()
}

/// Nearest ancestor-or-self carrying `attr`, and that attribute's value.
pub fn closest_attr(el: &Element, attr: &str) -> Option<String> {
    el.closest(&format!("[{attr}]")).ok()??.get_attribute(attr)
}

/// Grid cell index of the cell containing `el`.
pub fn cell_index(el: &Element) -> Option<usize> {
    closest_attr(el, "data-index")?.parse().ok()
}

/// Escape text for interpolation into HTML content or quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// Characters that would close a quoted CSS `url('...')` or break out of it.
const CSS_URL_RESERVED: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'\\');

/// Percent-encode `url` for use inside an inline-style `url('...')`.
pub fn css_url(url: &str) -> String {
    utf8_percent_encode(url, CSS_URL_RESERVED).to_string()
}

/// Build an absolute URL for an asset, taking into account the optional
/// `window.__BASE_URL` which is set by the host page.
pub fn asset_url(path: &str) -> String {
    let p = path.trim();
    if p.starts_with("http://") || p.starts_with("https://") || p.starts_with("data:") {
        return p.to_string();
    }
    let base = web_sys::window()
        .and_then(|w| {
            let v = js_sys::Reflect::get(&w, &JsValue::from_str("__BASE_URL")).ok()?;
            v.as_string()
        })
        .unwrap_or_else(|| "/".to_string());
    let base = if base.ends_with('/') {
        base
    } else {
        format!("{}/", base)
    };
    let p = p.trim_start_matches('/');
    format!("{}{}", base, p)
}

/// Fetch a text resource trying a list of fallback URLs in order.
pub async fn fetch_text_with_fallbacks(window: &Window, urls: &[&str]) -> Option<String> {
    for url in urls {
        let resp_value =
            match wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(url)).await {
                Ok(v) => v,
                Err(_) => continue,
            };
        let resp: web_sys::Response = match resp_value.dyn_into() {
            Ok(r) => r,
            Err(_) => continue,
        };
        if !resp.ok() {
            log(&format!("{url}: HTTP {}", resp.status()));
            continue;
        }
        if let Ok(text_promise) = resp.text()
            && let Ok(text_js) = wasm_bindgen_futures::JsFuture::from(text_promise).await
            && let Some(s) = text_js.as_string()
        {
            return Some(s);
        }
    }
    None
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_url_cannot_close_the_url_function() {
        let encoded = css_url("img/a.png');background:red;('");
        assert_eq!(encoded, "img/a.png%27%29;background:red;%28%27");
        assert_eq!(css_url("img/back\\slash.png"), "img/back%5Cslash.png");
        assert_eq!(css_url("img/library.png"), "img/library.png");
    }

    #[test]
    fn query_param_is_decoded() {
        assert_eq!(
            get_query_param("?rooms=data%2Frooms.json&x=1", "rooms").as_deref(),
            Some("data/rooms.json")
        );
        assert_eq!(get_query_param("?x=1", "rooms"), None);
    }
}
