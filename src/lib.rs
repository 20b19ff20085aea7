//! # anixart-wrapped
//!
//! Year-in-review statistics for Anixart profiles.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anixart_wrapped::{report, AnixartApi, ClientConfig, Deck, Session, WrappedBuilder, YearWindow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut api = AnixartApi::new(ClientConfig::default(), Session::default())?;
//!     api.sign_in("login", "password").await?;
//!
//!     let wrapped = WrappedBuilder::new(&api, YearWindow::current()).build().await?;
//!     let deck = Deck::from_wrapped(&wrapped);
//!     println!("{}", report::render_deck(&wrapped, &deck));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Layout
//!
//! - [`api`] - authenticated REST client and session storage
//! - [`stats`] - pure aggregation helpers (top release, last watched, year filters)
//! - [`wrapped`] - the pipeline that fetches and aggregates one year
//! - [`slides`] and [`report`] - slide ordering and text/JSON output

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod slides;
pub mod stats;
pub mod wrapped;

pub use api::{AnixartApi, Session, SignIn};
pub use config::{ClientConfig, Config, WrappedConfig};
pub use error::WrappedError;
pub use models::{BookmarkKind, Collection, HistoryItem, Profile, Release, Vote};
pub use slides::{Deck, Slide};
pub use stats::YearWindow;
pub use wrapped::{Wrapped, WrappedBuilder, WrappedSource, YearStats};
