use crate::contract::CHECK_REGISTRY;
use crate::errors::ProbeError;

pub fn handle_checks() -> Result<(), ProbeError> {
    for (idx, definition) in CHECK_REGISTRY.iter().enumerate() {
        let marker = if definition.needs_network {
            "  (sends an extra request)"
        } else {
            ""
        };
        println!(
            "{:>2}. {:<26} {}{}",
            idx + 1,
            definition.name.as_str(),
            definition.description,
            marker
        );
    }
    Ok(())
}
