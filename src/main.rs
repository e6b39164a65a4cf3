//! Todo Frontend Entry Point

mod components;
mod config;
mod logging;
mod models;

use std::rc::Rc;

use components::TodoList;
use config::AppConfig;
use retained_dom::{DomError, WebHost};

fn start(config: AppConfig) -> Result<(), DomError> {
    let host = WebHost::new()?;
    let body = host.body()?;
    let list = TodoList::new(host, Rc::new(config));
    list.mount(&body)?;
    // the list lives as long as the page
    std::mem::forget(list);
    Ok(())
}

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    logging::init(&config);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "ignoring malformed TODO_CONFIG");
    }

    if let Err(e) = start(config) {
        tracing::error!(error = %e, "failed to mount todo list");
    }
}
