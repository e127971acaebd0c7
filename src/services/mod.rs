// ShyNav services
// Stateless helpers and the settings file: URL resolution, palette filtering,
// context menu construction, settings persistence.

pub mod command_palette;
pub mod context_menu;
pub mod settings_engine;
pub mod url_resolver;
