//! Browser tests for WebHost. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use retained_dom::{el, Event, Host, WebHost};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_build_and_replace_in_document() {
    let host = WebHost::new().unwrap();
    let body = host.body().unwrap();
    let a = el::<WebHost>("li").text("a").build(&host).unwrap();
    let b = el::<WebHost>("li").text("b").build(&host).unwrap();
    let list = el::<WebHost>("ul").children(vec![a.clone(), b]).build(&host).unwrap();
    host.append_child(&body, &list).unwrap();

    let replacement = el::<WebHost>("li").text("A").build(&host).unwrap();
    host.replace_with(&a, &replacement).unwrap();

    assert_eq!(list.as_node().text_content().unwrap(), "Ab");
    assert!(a.as_node().parent_node().is_none());
}

#[wasm_bindgen_test]
fn test_listener_sees_checkbox_state() {
    let host = WebHost::new().unwrap();
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    let checkbox = el::<WebHost>("input")
        .attr("type", "checkbox")
        .attr("checked", true)
        .on("change", move |ev: &Event| *sink.borrow_mut() = ev.checked)
        .build(&host)
        .unwrap();

    let event = web_sys::Event::new("change").unwrap();
    checkbox
        .as_node()
        .dyn_ref::<web_sys::EventTarget>()
        .unwrap()
        .dispatch_event(&event)
        .unwrap();

    assert_eq!(*seen.borrow(), Some(true));
}

#[wasm_bindgen_test]
fn test_replaced_row_releases_listeners() {
    let host = WebHost::new().unwrap();
    let row = el::<WebHost>("li")
        .on("click", |_: &Event| {})
        .build(&host)
        .unwrap();
    let list = el::<WebHost>("ul").child(row.clone()).build(&host).unwrap();
    host.append_child(&host.body().unwrap(), &list).unwrap();
    assert_eq!(row.listener_refs(), 2);

    let mut current = row.clone();
    for _ in 0..5 {
        let next = el::<WebHost>("li")
            .on("click", |_: &Event| {})
            .build(&host)
            .unwrap();
        host.replace_with(&current, &next).unwrap();
        current = next;
    }

    assert_eq!(row.listener_refs(), 1);
    assert_eq!(current.listener_refs(), 2);
    assert_eq!(list.as_node().child_nodes().length(), 1);
}

#[wasm_bindgen_test]
fn test_replace_detached_is_noop() {
    let host = WebHost::new().unwrap();
    let lonely = el::<WebHost>("li").text("x").build(&host).unwrap();
    let other = el::<WebHost>("li").text("y").build(&host).unwrap();

    host.replace_with(&lonely, &other).unwrap();

    assert!(other.as_node().parent_node().is_none());
    assert_eq!(other.listener_refs(), 1);
}
