/*!
# Autodiary

Autodiary is a personal diary kept as a single delimited table with one row per
calendar day. It makes sure no day goes unaccounted for: before today can be
recorded, every day missed since the last entry is filled in, oldest first. From
the table it derives yearly happiness rankings, people rankings, recording
totals and keyword searches.

## Core Features

- Catch-up recording that backfills missed days in order
- A store that rejects duplicate, out-of-order and gapped appends
- Yearly statistics: ranked months, ranked weekdays and most mentioned people
- Case-insensitive keyword search with CSV reports
- Bulk import of legacy headerless exports

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure
- `diary_core`: Entry types and date continuity, with no I/O
- `store`: The persisted diary table
- `prompt`: Where the fields of new entries come from
- `ops`: Update, statistics, search, reports and import

## Usage Example

```rust,no_run
use autodiary::{Config, DiaryStore};
use autodiary::ops;

fn main() -> autodiary::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let store = DiaryStore::load(&config.table_path())?;
    for entry in ops::search(&store, "beach") {
        println!("{}: {:?}", entry.date, entry.summary);
    }
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Constants shared across modules
pub mod constants;
/// Entry types and date continuity
pub mod diary_core;
/// Error types and utilities for error handling
pub mod errors;
/// High-level diary operations
pub mod ops;
/// Sources for the fields of new entries
pub mod prompt;
/// The persisted diary table
pub mod store;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use diary_core::Entry;
pub use errors::{AppError, AppResult};
pub use store::DiaryStore;
