use anyhow::Context;
use clap::Parser;
use l10n_editor::config::{Cli, Command};
use l10n_editor::{EditorState, run_gui};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut state = EditorState::load(cli.open_store());
    state.set_export_options(cli.export_options());
    if !cli.memory {
        info!(path = %cli.store_path().display(), "Using store");
    }

    match cli.command {
        None => run_gui(state, None).map_err(|e| anyhow::anyhow!("{e}")),
        Some(Command::Gui { import }) => run_gui(state, import).map_err(|e| anyhow::anyhow!("{e}")),
        Some(Command::Import { file }) => {
            state
                .import_path(&file)
                .with_context(|| format!("importing {file:?}"))?;
            if let Some(err) = state.take_storage_error() {
                return Err(err).context("items were imported but not saved");
            }
            println!("{} items", state.len());
            Ok(())
        }
        Some(Command::Export { out }) => match out {
            Some(path) => state
                .export_to_path(&path)
                .with_context(|| format!("exporting to {path:?}")),
            None => {
                let text = state.export_pretty().context("exporting")?;
                std::io::stdout().write_all(text.as_bytes())?;
                Ok(())
            }
        },
        Some(Command::List) => {
            let mut stdout = std::io::stdout().lock();
            for (top, entries) in state.groups() {
                writeln!(stdout, "[{}]", l10n_editor::labelize(top))?;
                for entry in entries {
                    writeln!(stdout, "  {} = {}", entry.key, entry.value)?;
                }
            }
            Ok(())
        }
    }
}
