//! Desktop shell window using `wry` + `tao`.
//!
//! Architecture:
//! - The chrome (sidebar, address bar, palette) is a child webview on the
//!   left, served from inline HTML.
//! - Every tab is a child webview from [`WrySurfaceProvider`] filling the
//!   rest of the window; only the active one is visible.
//! - Chrome IPC and surface callbacks both wake the event loop through
//!   `UserEvent`s. All `App` calls happen on the event loop thread.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{json, Value};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::WindowBuilder;
use tokio::sync::mpsc::UnboundedReceiver;
use wry::{WebView, WebViewBuilder};

use crate::app::App;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::command::TabAction;
use crate::types::notification::Notification;
use crate::types::tab::TabId;
use crate::ui::wry_surface::{ContentBounds, ContentLayout, UserEvent, WrySurfaceProvider};

const SIDEBAR_WIDTH: f64 = 260.0;
const SIDEBAR_COLLAPSED_WIDTH: f64 = 48.0;

const CHROME_HTML: &str = r#"<!DOCTYPE html><html><head><meta charset="UTF-8"><style>
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,"Segoe UI",sans-serif;background:#f5f5f5;color:#222;height:100vh;display:flex;flex-direction:column;user-select:none}
#bar{display:flex;gap:4px;padding:8px}
#bar button{border:0;background:none;cursor:pointer;padding:4px 6px;border-radius:6px}
#bar button:hover{background:#e4e4e4}
#address{margin:0 8px 8px;padding:6px 10px;border:1px solid #ddd;border-radius:8px}
#tabs{flex:1;overflow-y:auto;list-style:none;padding:0 6px}
#tabs li{display:flex;align-items:center;gap:8px;padding:6px 8px;border-radius:8px;cursor:pointer}
#tabs li.active{background:#e0e0e0}
#tabs li img{width:16px;height:16px}
#tabs li span{flex:1;overflow:hidden;white-space:nowrap;text-overflow:ellipsis}
#palette{display:none;position:fixed;inset:8px;background:#fff;border-radius:10px;box-shadow:0 4px 16px rgba(0,0,0,.2);padding:8px}
#palette.open{display:block}
#palette input{width:100%;padding:6px 10px;border:1px solid #ddd;border-radius:8px}
body.collapsed #address,body.collapsed #tabs span{display:none}
</style></head><body>
<div id="bar"><button data-action="back">&#8592;</button><button data-action="forward">&#8594;</button><button data-action="reload">&#8635;</button><button id="newtab">+</button></div>
<input id="address" placeholder="Search or enter address">
<ul id="tabs"></ul>
<div id="palette"><input id="query" placeholder="Search tabs or the web"><ul id="matches"></ul></div>
<script>
(function(){
  var send=function(cmd,args){window.ipc.postMessage(JSON.stringify(Object.assign({cmd:cmd},args||{})))};
  var state={tabs:[],active_id:null};
  window.__shynav={render:function(s){
    state=s;
    document.body.classList.toggle('collapsed',s.sidebar_collapsed);
    document.getElementById('palette').classList.toggle('open',s.palette_open);
    var list=document.getElementById('tabs');list.innerHTML='';
    s.tabs.forEach(function(t){
      var li=document.createElement('li');if(t.is_active)li.className='active';
      if(t.favicon){var img=document.createElement('img');img.src=t.favicon;li.appendChild(img)}
      var span=document.createElement('span');span.textContent=(t.is_loading?'... ':'')+(t.title||t.url);li.appendChild(span);
      li.onclick=function(){send('activate',{id:t.id})};
      li.onauxclick=function(){send('close_tab',{id:t.id})};
      list.appendChild(li);
      if(t.is_active&&document.activeElement!==document.getElementById('address'))document.getElementById('address').value=t.url;
    });
  }};
  document.querySelectorAll('#bar [data-action]').forEach(function(b){b.onclick=function(){send('action',{action:b.dataset.action})}});
  document.getElementById('newtab').onclick=function(){send('open_palette')};
  document.getElementById('address').onkeydown=function(e){if(e.key==='Enter')send('navigate',{url:e.target.value})};
  document.getElementById('query').onkeydown=function(e){
    if(e.key==='Enter')send('palette_submit',{query:e.target.value});
    if(e.key==='Escape')send('close_palette');
  };
  document.addEventListener('keydown',function(e){
    var k=[];if(e.ctrlKey)k.push('Ctrl');if(e.metaKey)k.push('Cmd');if(e.altKey)k.push('Alt');if(e.shiftKey)k.push('Shift');
    if(!k.length&&e.key!=='Escape')return;
    var key=e.key.length===1?e.key.toUpperCase():e.key.replace('Arrow','');
    send('accelerator',{keys:k.concat([key]).join('+')});
  });
  send('ready');
})();
</script></body></html>"#;

fn sidebar_width(app: &App) -> f64 {
    if app.is_sidebar_collapsed() {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    }
}

fn content_bounds(window: &tao::window::Window, sidebar: f64) -> ContentBounds {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    ContentBounds {
        x: sidebar,
        y: 0.0,
        width: (size.width - sidebar).max(0.0),
        height: size.height,
    }
}

fn chrome_bounds(window: &tao::window::Window, sidebar: f64) -> ContentBounds {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    ContentBounds { x: 0.0, y: 0.0, width: sidebar, height: size.height }
}

fn render_script(app: &App) -> String {
    let state = json!({
        "tabs": app.get_all_tabs(),
        "active_id": app.registry().active_id(),
        "palette_open": app.is_palette_open(),
        "sidebar_collapsed": app.is_sidebar_collapsed(),
    });
    format!("window.__shynav&&__shynav.render({})", state)
}

fn report(result: Result<Option<TabId>, crate::types::errors::SurfaceError>) {
    if let Err(e) = result {
        log::warn!("could not open tab: {}", e);
    }
}

fn handle_chrome_message(app: &mut App, message: &str) {
    let msg: Value = match serde_json::from_str(message) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("malformed chrome message: {}", e);
            return;
        }
    };
    let cmd = msg.get("cmd").and_then(|v| v.as_str()).unwrap_or("");
    let tab_id = msg.get("id").and_then(|v| v.as_u64()).map(TabId);

    match cmd {
        "ready" => {}
        "activate" => {
            if let Some(id) = tab_id {
                app.set_active_tab(id);
            }
        }
        "close_tab" => {
            if let Some(id) = tab_id {
                app.close_tab(id);
            }
        }
        "navigate" => {
            let input = msg.get("url").and_then(|v| v.as_str()).unwrap_or("");
            report(app.navigate_active(input).map(Some));
        }
        "action" => {
            let action = msg.get("action").and_then(|v| v.as_str()).unwrap_or("");
            match (app.registry().active_id(), action.parse::<TabAction>()) {
                (Some(id), Ok(action)) => {
                    app.tab_action(id, action);
                }
                (_, Err(e)) => log::debug!("{}", e),
                _ => {}
            }
        }
        "accelerator" => {
            let keys = msg.get("keys").and_then(|v| v.as_str()).unwrap_or("");
            app.handle_accelerator(keys);
        }
        "open_palette" => app.open_palette(),
        "close_palette" => app.close_palette(),
        "palette_submit" => {
            let query = msg.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let selected = msg.get("selected").and_then(|v| v.as_u64()).map(TabId);
            report(app.palette_submit(query, selected));
        }
        other => log::debug!("unknown chrome command: {}", other),
    }
}

/// Pumps surface events and repaints the chrome if anything changed.
fn sync_chrome(
    app: &mut App,
    notifications: &mut UnboundedReceiver<Notification>,
    chrome: &WebView,
    force: bool,
) {
    app.pump_events();
    let mut changed = force;
    while notifications.try_recv().is_ok() {
        changed = true;
    }
    if changed {
        if let Err(e) = chrome.evaluate_script(&render_script(app)) {
            log::warn!("chrome update failed: {}", e);
        }
    }
}

fn relayout(
    window: &tao::window::Window,
    chrome: &WebView,
    layout: &RefCell<ContentLayout>,
    sidebar: f64,
) {
    if let Err(e) = chrome.set_bounds(chrome_bounds(window, sidebar).to_rect()) {
        log::warn!("could not resize chrome: {}", e);
    }
    layout.borrow_mut().resize(content_bounds(window, sidebar));
}

// ─── Main entry point ───

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings_engine = SettingsEngine::new(None);
    if let Err(e) = settings_engine.load() {
        log::warn!("{}; using default settings", e);
    }

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = Rc::new(
        WindowBuilder::new()
            .with_title("ShyNav")
            .with_inner_size(tao::dpi::LogicalSize::new(1280.0, 800.0))
            .build(&event_loop)?,
    );

    let layout = Rc::new(RefCell::new(ContentLayout::new(content_bounds(
        &window,
        SIDEBAR_WIDTH,
    ))));
    let provider = WrySurfaceProvider::new(window.clone(), proxy.clone(), layout.clone());
    let mut app = App::new(Box::new(provider), settings_engine);
    let mut notifications = app.subscribe();

    let ipc_proxy = proxy.clone();
    let chrome = WebViewBuilder::new()
        .with_html(CHROME_HTML)
        .with_bounds(chrome_bounds(&window, SIDEBAR_WIDTH).to_rect())
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let _ = ipc_proxy.send_event(UserEvent::ChromeIpc(msg.body().clone()));
        })
        .with_devtools(cfg!(debug_assertions))
        .build_as_child(window.as_ref())?;

    app.create_tab(None)?;
    let mut sidebar = sidebar_width(&app);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                app.shutdown();
                *control_flow = ControlFlow::Exit;
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => relayout(&window, &chrome, &layout, sidebar),

            Event::UserEvent(user_event) => {
                let force = match user_event {
                    UserEvent::SurfaceActivity => false,
                    UserEvent::ChromeIpc(message) => {
                        handle_chrome_message(&mut app, &message);
                        true
                    }
                    UserEvent::WindowOpen { opener, url } => {
                        report(app.handle_window_open(opener, &url));
                        false
                    }
                };
                let wanted = sidebar_width(&app);
                if wanted != sidebar {
                    sidebar = wanted;
                    relayout(&window, &chrome, &layout, sidebar);
                }
                sync_chrome(&mut app, &mut notifications, &chrome, force);
            }

            _ => {}
        }
    })
}
