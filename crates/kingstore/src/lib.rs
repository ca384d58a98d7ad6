//! Kingstore: storage for a Telegram channel publishing bot.
//!
//! Re-exports the workspace crates and hosts the `kingstore` operator CLI.
//!
//! ```no_run
//! use kingstore::{NewPostBuilder, apply_schema, create_post, establish_connection};
//!
//! let mut conn = establish_connection("sqlite:///./bot.sqlite3")?;
//! apply_schema(&mut conn)?;
//! let post = NewPostBuilder::default().author_id(42i64).text("Hello").build().unwrap();
//! let row = create_post(&mut conn, &post)?;
//! println!("draft #{}", row.id());
//! # Ok::<(), kingstore::DatabaseError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;

pub use kingstore_core::*;
pub use kingstore_database::*;
pub use kingstore_error::*;
