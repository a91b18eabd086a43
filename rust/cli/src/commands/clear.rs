use crate::error::CliError;
use spider_engine::persist::GameStore;
use std::io::Write;

pub fn handle_clear_command(store: &mut dyn GameStore, out: &mut dyn Write) -> Result<(), CliError> {
    store.clear()?;
    writeln!(out, "Saved game cleared")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spider_engine::deck::Level;
    use spider_engine::engine::Engine;
    use spider_engine::persist::MemoryStore;

    #[test]
    fn test_clear_empties_slot_and_is_idempotent() {
        let mut store = MemoryStore::new();
        store
            .save(&Engine::new(Level::Beginner, Some(1)).serialize())
            .unwrap();

        let mut out = Vec::new();
        handle_clear_command(&mut store, &mut out).unwrap();
        handle_clear_command(&mut store, &mut out).unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
