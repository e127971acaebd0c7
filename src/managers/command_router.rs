//! Navigation command router.
//!
//! Resolves an addressed tab id and applies the command to that tab only.
//! Ids are never reused, so a stale id can miss but never hit a newer tab.

use crate::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use crate::types::command::NavCommand;
use crate::types::tab::TabId;

pub struct NavigationCommandRouter;

impl NavigationCommandRouter {
    /// Returns false when the tab no longer exists; the command is dropped.
    pub fn dispatch(registry: &mut TabRegistry, tab_id: TabId, command: NavCommand) -> bool {
        let Some(tab) = registry.get_tab_mut(tab_id) else {
            log::debug!("dropping {:?} for closed tab {}", command, tab_id);
            return false;
        };
        match command {
            NavCommand::Navigate(url) => tab.load_url(&url),
            NavCommand::Back => tab.go_back(),
            NavCommand::Forward => tab.go_forward(),
            NavCommand::Reload => tab.reload(),
            NavCommand::Stop => tab.stop(),
        }
        true
    }
}
