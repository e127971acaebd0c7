//! ShyNav desktop front end.
//!
//! Uses `wry` for the embedded surfaces and `tao` for the window:
//! - Windows: WebView2
//! - Linux: WebKitGTK (child webviews need X11)
//! - macOS: WKWebView
//!
//! One child webview renders the shell chrome (sidebar, address bar, palette);
//! every tab gets its own child webview behind [`wry_surface::WrySurface`].

pub mod webview_app;
pub mod wry_surface;
