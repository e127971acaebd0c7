//! RPC method handler for the ShyNav JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be tested without stdio. The
//! `handle_method` function maps each method onto an `App` operation.

use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::download_manager::DownloadManagerTrait;
use crate::managers::history_manager::HistoryManagerTrait;
use crate::managers::shortcut_manager::ShortcutManagerTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::command::TabAction;
use crate::types::context_menu::{ContextParams, MenuAction};
use crate::types::surface::SurfaceEvent;
use crate::types::tab::TabId;

fn to_json<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn tab_param(params: &Value, name: &str) -> Result<TabId, String> {
    params
        .get(name)
        .and_then(|v| v.as_u64())
        .map(TabId)
        .ok_or_else(|| format!("missing {}", name))
}

fn typed_param<T: serde::de::DeserializeOwned>(params: &Value, name: &str) -> Result<T, String> {
    let raw = params.get(name).cloned().ok_or_else(|| format!("missing {}", name))?;
    serde_json::from_value(raw).map_err(|e| format!("invalid {}: {}", name, e))
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// Lookups of closed tabs are not errors; they report `"ok": false`.
pub fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true, "version": env!("CARGO_PKG_VERSION")})),

        // ─── Tabs ───
        "tab.create" => {
            let url = params.get("url").and_then(|v| v.as_str());
            let id = app.create_tab(url).map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "tab.close" => {
            let id = tab_param(params, "id")?;
            Ok(json!({"ok": app.close_tab(id)}))
        }
        "tab.activate" => {
            let id = tab_param(params, "id")?;
            Ok(json!({"ok": app.set_active_tab(id)}))
        }
        "tab.navigate" => {
            let url = str_param(params, "url")?;
            match params.get("id") {
                Some(_) => {
                    let id = tab_param(params, "id")?;
                    Ok(json!({"ok": app.navigate_tab(id, url), "id": id}))
                }
                None => {
                    let id = app.navigate_active(url).map_err(|e| e.to_string())?;
                    Ok(json!({"ok": true, "id": id}))
                }
            }
        }
        "tab.action" => {
            let id = tab_param(params, "id")?;
            let action = TabAction::from_str(str_param(params, "action")?)?;
            Ok(json!({"ok": app.tab_action(id, action)}))
        }
        "tab.list" => to_json(app.get_all_tabs()),
        "tab.active" => to_json(app.get_active_tab()),
        "tab.window_open" => {
            let opener = tab_param(params, "opener")?;
            let url = str_param(params, "url")?;
            let id = app.handle_window_open(opener, url).map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }
        "tab.context_menu" => {
            let id = tab_param(params, "id")?;
            let context: ContextParams = match params.get("context") {
                Some(_) => typed_param(params, "context")?,
                None => ContextParams::default(),
            };
            match app.context_menu(id, &context) {
                Some(entries) => to_json(entries),
                None => Ok(Value::Null),
            }
        }
        "tab.menu_action" => {
            let id = tab_param(params, "id")?;
            let action: MenuAction = typed_param(params, "action")?;
            let request = app.activate_menu_item(id, action);
            Ok(json!({"host_request": to_json(request)?}))
        }

        // ─── Surface events delivered by the host ───
        "surface.event" => {
            let id = tab_param(params, "id")?;
            let event: SurfaceEvent = typed_param(params, "event")?;
            Ok(json!({"ok": app.inject_surface_event(id, event)}))
        }

        // ─── Shell chrome ───
        "shell.state" => Ok(json!({
            "palette_open": app.is_palette_open(),
            "sidebar_collapsed": app.is_sidebar_collapsed(),
            "tab_count": app.get_all_tabs().len(),
            "active_id": app.registry().active_id(),
        })),
        "sidebar.toggle" => Ok(json!({"collapsed": app.toggle_sidebar()})),
        "palette.open" => {
            app.open_palette();
            Ok(json!({"ok": true}))
        }
        "palette.close" => {
            app.close_palette();
            Ok(json!({"ok": true}))
        }
        "palette.filter" => {
            let query = params.get("query").and_then(|v| v.as_str()).unwrap_or("");
            to_json(app.palette_filter(query))
        }
        "palette.submit" => {
            let query = params.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let selected = params.get("selected").and_then(|v| v.as_u64()).map(TabId);
            let id = app.palette_submit(query, selected).map_err(|e| e.to_string())?;
            Ok(json!({"id": id}))
        }

        // ─── Shortcuts ───
        "shortcut.trigger" => {
            let keys = str_param(params, "keys")?;
            let action = app.handle_accelerator(keys);
            Ok(json!({"action": action.map(|a| a.name())}))
        }
        "shortcut.list" => to_json(app.shortcuts.list_shortcuts()),

        // ─── History ───
        "history.recent" => {
            let limit = params.get("limit").and_then(|v| v.as_u64()).unwrap_or(50) as usize;
            let entries: Vec<_> = app.history.list_history().iter().take(limit).collect();
            to_json(entries)
        }
        "history.search" => {
            let query = str_param(params, "query")?;
            to_json(app.history.search_history(query))
        }
        "history.delete" => {
            let id = str_param(params, "id")?;
            Ok(json!({"ok": app.history.delete_entry(id)}))
        }
        "history.clear" => {
            app.history.clear_all();
            Ok(json!({"ok": true}))
        }

        // ─── Downloads ───
        "download.list" => to_json(app.downloads.list_downloads()),
        "download.complete" => {
            let id = str_param(params, "id")?;
            Ok(json!({"ok": app.downloads.mark_completed(id)}))
        }
        "download.remove" => {
            let id = str_param(params, "id")?;
            Ok(json!({"ok": app.downloads.remove_download(id)}))
        }
        "download.clear" => {
            app.downloads.clear();
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => match params.get("key").and_then(|v| v.as_str()) {
            Some(key) => app.settings_engine.get_value(key).map_err(|e| e.to_string()),
            None => to_json(app.settings()),
        },
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.update_setting(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            app.settings_engine.reset().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
