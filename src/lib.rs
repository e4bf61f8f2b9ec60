pub mod cli;
pub mod config;
pub mod filter;
pub mod intake;
pub mod models;
pub mod nextaction;
pub mod presets;
pub mod store;
pub mod suggest;
pub mod tasks;
pub mod utils;

pub use config::Config;
pub use models::{Client, ClientLog, Requirements, Urgency};
pub use store::ClientStore;
pub use suggest::{Suggestion, SuggestionKind, select_next_actions};
pub use tasks::{DerivedTask, extract_tasks};
pub use utils::Profile;
