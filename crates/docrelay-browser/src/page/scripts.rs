//! JavaScript snippets evaluated by [`CdpPage`](super::CdpPage).
//!
//! Elements are tagged with a `data-relay-handle` attribute the first time a
//! query returns them; later calls find them again through that attribute.

use serde_json::Value;

use super::{AttachMode, ElementHandle, TextShape};

pub(super) const HANDLE_ATTR: &str = "data-relay-handle";

/// JSON string literal for embedding into a script.
pub(super) fn js_str(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Expression resolving a handle to its element, or `null`.
fn lookup(handle: &ElementHandle) -> String {
    format!(
        "document.querySelector({})",
        js_str(&format!("[{}=\"{}\"]", HANDLE_ATTR, handle.as_str()))
    )
}

/// Wrap `body` in a function receiving the element as `el`.
fn on_element(handle: &ElementHandle, body: &str) -> String {
    format!(
        "(() => {{ const el = {}; if (!el) return false; {} return true; }})()",
        lookup(handle),
        body
    )
}

pub(super) fn query(selector: &str, scope: Option<&ElementHandle>) -> String {
    let root = match scope {
        Some(handle) => lookup(handle),
        None => "document".to_string(),
    };
    format!(
        r#"(() => {{
  const root = {root};
  if (!root) return [];
  let nodes;
  try {{ nodes = Array.from(root.querySelectorAll({selector})); }} catch (e) {{ return []; }}
  window.__relaySeq = window.__relaySeq || 0;
  return nodes.map((el) => {{
    let handle = el.getAttribute("{attr}");
    if (!handle) {{
      window.__relaySeq += 1;
      handle = "h" + window.__relaySeq;
      el.setAttribute("{attr}", handle);
    }}
    const r = el.getBoundingClientRect();
    const cls = typeof el.className === "string" ? el.className : (el.getAttribute("class") || "");
    return {{
      handle,
      tag: el.tagName.toLowerCase(),
      ariaLabel: el.getAttribute("aria-label"),
      text: (el.textContent || "").trim(),
      disabled: !!el.disabled,
      contentEditable: el.getAttribute("contenteditable") === "true",
      className: cls,
      rect: {{ left: r.left, top: r.top, right: r.right, bottom: r.bottom }},
    }};
  }});
}})()"#,
        root = root,
        selector = js_str(selector),
        attr = HANDLE_ATTR,
    )
}

pub(super) fn click(handle: &ElementHandle) -> String {
    on_element(handle, "el.click();")
}

pub(super) fn focus(handle: &ElementHandle) -> String {
    on_element(handle, "el.focus();")
}

pub(super) fn insert_text(handle: &ElementHandle, text: &str, shape: TextShape) -> String {
    let text = js_str(text);
    let write = match shape {
        TextShape::Rich => format!(
            r#"el.focus();
  el.innerHTML = "";
  let p = el.querySelector("p");
  if (!p) {{ p = document.createElement("p"); el.appendChild(p); }}
  p.removeAttribute("data-placeholder");
  p.classList.remove("placeholder");
  p.textContent = text;
  el.textContent = text;
  el.innerText = text;"#
        ),
        TextShape::Plain => r#"el.focus();
  const proto = el.tagName === "TEXTAREA" ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype;
  const setter = Object.getOwnPropertyDescriptor(proto, "value")?.set;
  if (setter) { setter.call(el, text); } else { el.value = text; }"#
            .to_string(),
    };
    let body = format!(
        r#"const text = {text};
  {write}
  el.dispatchEvent(new Event("input", {{ bubbles: true }}));
  el.dispatchEvent(new Event("change", {{ bubbles: true }}));
  el.dispatchEvent(new InputEvent("input", {{ bubbles: true, cancelable: true, inputType: "insertText", data: text }}));"#
    );
    on_element(handle, &body)
}

pub(super) fn attach_file(
    handle: &ElementHandle,
    name: &str,
    mime_type: &str,
    base64: &str,
    mode: AttachMode,
) -> String {
    let deliver = match mode {
        AttachMode::Input => {
            r#"el.files = dt.files;
  el.dispatchEvent(new Event("change", { bubbles: true }));"#
        }
        AttachMode::Drop => {
            r#"el.dispatchEvent(new DragEvent("drop", { bubbles: true, cancelable: true, dataTransfer: dt }));"#
        }
    };
    let body = format!(
        r#"const raw = atob({data});
  const bytes = new Uint8Array(raw.length);
  for (let i = 0; i < raw.length; i++) bytes[i] = raw.charCodeAt(i);
  const file = new File([bytes], {name}, {{ type: {mime} }});
  const dt = new DataTransfer();
  dt.items.add(file);
  {deliver}"#,
        data = js_str(base64),
        name = js_str(name),
        mime = js_str(mime_type),
        deliver = deliver,
    );
    on_element(handle, &body)
}

pub(super) fn press_enter(handle: &ElementHandle) -> String {
    on_element(
        handle,
        r#"el.dispatchEvent(new KeyboardEvent("keydown", { key: "Enter", code: "Enter", keyCode: 13, which: 13, bubbles: true, cancelable: true }));"#,
    )
}

pub(super) const VIEWPORT: &str = "({ width: window.innerWidth, height: window.innerHeight })";

pub(super) fn global_json(name: &str) -> String {
    format!(
        "(() => {{ try {{ const v = window[{}]; return v === undefined ? null : JSON.parse(JSON.stringify(v)); }} catch (e) {{ return null; }} }})()",
        js_str(name)
    )
}

pub(super) fn inline_scripts(needle: &str) -> String {
    format!(
        "Array.from(document.querySelectorAll(\"script\")).map((s) => s.textContent || \"\").filter((t) => t.includes({}))",
        js_str(needle)
    )
}
