use super::load_saved;
use crate::error::CliError;
use crate::formatters::format_board;
use spider_engine::persist::GameStore;
use std::io::Write;

/// Prints the saved game without changing it.
pub fn handle_show_command(
    history_depth: usize,
    store: &mut dyn GameStore,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let engine = load_saved(store, history_depth)?;
    let secs = engine.elapsed_secs();
    writeln!(out, "{}", format_board(&engine.state()))?;
    writeln!(out, "Time: {}:{:02}", secs / 60, secs % 60)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spider_engine::deck::Level;
    use spider_engine::engine::Engine;
    use spider_engine::persist::MemoryStore;

    #[test]
    fn test_show_prints_board_and_time() {
        let mut store = MemoryStore::new();
        let mut engine = Engine::new(Level::Intermediate, Some(6));
        engine.add_elapsed(75);
        store.save(&engine.serialize()).unwrap();

        let mut out = Vec::new();
        handle_show_command(20, &mut store, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Level: intermediate"));
        assert!(output.contains("7: "));
        assert!(output.contains("Time: 1:15"));
    }
}
