//! # cla-webhook
//!
//! GitHub webhook gateway for the CLA checker.
//!
//! Deliveries are authenticated against the shared secret before anything
//! else happens. Authenticated `pull_request` events for open pull requests
//! in allow-listed organisations run the full compliance check; `ping`
//! answers `pong`; other events get a 404.
//!
//! | Outcome                          | HTTP |
//! |----------------------------------|------|
//! | `ping`                           | 200 `pong` |
//! | `pull_request` checked / ignored | 200  |
//! | missing or bad signature         | 403  |
//! | unparsable payload               | 400  |
//! | other event                      | 404  |
//! | registry or GitHub failure       | 500  |

pub mod error;
pub mod event;
pub mod gateway;
pub mod server;
pub mod signature;

pub use error::WebhookError;
pub use event::{EventKind, PullRequestEvent};
pub use gateway::{Delivery, Outcome, WebhookGateway};
pub use server::{WEBHOOK_PATH, router, serve};
pub use signature::{Signatures, sign_sha1, sign_sha256, verify};
