//! UK postcode lookup client.
//!
//! Resolves postcodes to administrative and geographic metadata, points to
//! their nearest postcode, and finds every postcode within a radius of a
//! postcode or a point. Lookups go through a [`PostCoder`], which caches
//! results per instance since postcode data does not change.
//!
//! ```no_run
//! use postcodes::{ClientConfig, PostCoder};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let coder = PostCoder::from_config(ClientConfig::from_env())?;
//! let lookup = coder.get("SW1A 1AA", false).await?;
//! if let Some(data) = lookup.as_found() {
//!     println!("{}", data["postcode"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod domain;
pub mod transport;

pub use coordinator::{LookupError, PostCoder};
pub use transport::{ClientConfig, Lookup, MockTransport, PostcodeClient, Transport, TransportError};
