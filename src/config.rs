use crate::flatten::ExportOptions;
use crate::store::{AnyStore, FileStore, MemoryStore};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store file holding the edited items between sessions
    #[arg(long, value_name = "PATH", conflicts_with = "memory")]
    pub store: Option<PathBuf>,

    /// Keep everything in memory; nothing is persisted
    #[arg(long)]
    pub memory: bool,

    /// On export, turn nested objects keyed "0".."n-1" back into arrays
    #[arg(long)]
    pub restore_arrays: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the editor window (the default)
    Gui {
        /// JSON file to import on startup, replacing the stored items
        #[arg(long, value_name = "FILE")]
        import: Option<PathBuf>,
    },
    /// Import a JSON file into the store without opening a window
    Import {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Write the stored items as nested JSON
    Export {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the stored items grouped by section
    List,
}

impl Cli {
    pub fn store_path(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(FileStore::default_path)
    }

    pub fn open_store(&self) -> AnyStore {
        if self.memory {
            AnyStore::Memory(MemoryStore::new())
        } else {
            AnyStore::File(FileStore::new(self.store_path()))
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            restore_arrays: self.restore_arrays,
        }
    }
}
