pub mod badge;
pub mod config;
pub mod goal;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(goal::definitions())
        .chain(badge::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}
