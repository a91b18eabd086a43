use super::load_saved;
use crate::error::CliError;
use crate::formatters::format_hint;
use spider_engine::persist::GameStore;
use std::io::Write;

/// Prints the engine's suggestion for the saved game. The slot is left as is.
pub fn handle_hint_command(
    history_depth: usize,
    store: &mut dyn GameStore,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut engine = load_saved(store, history_depth)?;
    writeln!(out, "{}", format_hint(&engine.request_hint()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spider_engine::deck::Level;
    use spider_engine::engine::Engine;
    use spider_engine::persist::MemoryStore;

    #[test]
    fn test_hint_matches_engine() {
        let mut store = MemoryStore::new();
        let mut engine = Engine::new(Level::Advanced, Some(14));
        store.save(&engine.serialize()).unwrap();

        let mut out = Vec::new();
        handle_hint_command(20, &mut store, &mut out).unwrap();
        let expected = format_hint(&engine.request_hint());
        assert_eq!(String::from_utf8(out).unwrap().trim_end(), expected);
    }
}
