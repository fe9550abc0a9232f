//! Artifact session — the sole side-effecting boundary of the pipeline.
//!
//! A batch acquires exactly one session, reuses it for every (row, variant)
//! pair, and releases it exactly once. The pipeline depends only on the
//! acquire/create/release contract here; the shipped backend materializes
//! each rendered message as an RFC 5322 `.eml` template file, and tests
//! substitute an in-memory recording session behind the same traits.

use std::fs;
use std::path::{Path, PathBuf};

use lettre::Message;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use tracing::{debug, info};

use crate::error::SessionError;
use crate::pipeline::types::RenderedMessage;
use crate::recipients::AddressEntry;

/// Reference to one created artifact — effectively its filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub path: PathBuf,
}

/// One live artifact-creation session.
///
/// Not safe for concurrent use: exactly one create call is in flight at a
/// time, which the single-threaded batch runner guarantees by threading
/// `&mut` through the call chain.
pub trait ArtifactSession {
    /// File extension this session's artifacts carry (no leading dot).
    fn file_extension(&self) -> &'static str;

    /// Create one template artifact at `dest`.
    ///
    /// Fails with [`SessionError::ArtifactCreation`] on any underlying
    /// failure (disk, permissions, recipient rejected by the backend);
    /// callers treat that as a per-artifact failure, never fatal.
    fn create_artifact(
        &mut self,
        message: &RenderedMessage,
        dest: &Path,
    ) -> Result<ArtifactRef, SessionError>;

    /// Tear down the session. Called exactly once after the last row.
    fn release(&mut self) -> Result<(), SessionError>;
}

/// Provider of artifact sessions.
pub trait ArtifactBackend {
    /// Initialize the capability and hand out one reusable session.
    ///
    /// Fails with [`SessionError::Unavailable`] when the capability cannot
    /// be initialized; that is fatal for the whole batch.
    fn acquire(&self) -> Result<Box<dyn ArtifactSession>, SessionError>;
}

// ── .eml file backend ───────────────────────────────────────────────

/// Backend that writes each message as an `.eml` template file under a
/// destination root.
pub struct EmlBackend {
    root: PathBuf,
    from_address: String,
}

impl EmlBackend {
    pub fn new(root: PathBuf, from_address: String) -> Self {
        Self { root, from_address }
    }
}

impl ArtifactBackend for EmlBackend {
    fn acquire(&self) -> Result<Box<dyn ArtifactSession>, SessionError> {
        let from: Mailbox =
            self.from_address
                .parse()
                .map_err(|e| SessionError::Unavailable {
                    reason: format!("invalid from address {}: {e}", self.from_address),
                })?;

        fs::create_dir_all(&self.root).map_err(|e| SessionError::Unavailable {
            reason: format!("cannot create output root {}: {e}", self.root.display()),
        })?;

        info!(root = %self.root.display(), "Artifact session acquired");
        Ok(Box::new(EmlSession { from, created: 0 }))
    }
}

struct EmlSession {
    from: Mailbox,
    created: usize,
}

impl ArtifactSession for EmlSession {
    fn file_extension(&self) -> &'static str {
        "eml"
    }

    fn create_artifact(
        &mut self,
        message: &RenderedMessage,
        dest: &Path,
    ) -> Result<ArtifactRef, SessionError> {
        let creation_error = |reason: String| SessionError::ArtifactCreation {
            path: dest.to_path_buf(),
            reason,
        };

        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML);

        for entry in &message.to {
            builder = builder.to(to_mailbox(entry).map_err(&creation_error)?);
        }
        for entry in &message.cc {
            builder = builder.cc(to_mailbox(entry).map_err(&creation_error)?);
        }
        for entry in &message.bcc {
            builder = builder.bcc(to_mailbox(entry).map_err(&creation_error)?);
        }

        let email = builder
            .body(message.html_body.clone())
            .map_err(|e| creation_error(format!("message build failed: {e}")))?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| creation_error(format!("cannot create {}: {e}", parent.display())))?;
        }
        fs::write(dest, email.formatted())
            .map_err(|e| creation_error(format!("write failed: {e}")))?;

        self.created += 1;
        debug!(path = %dest.display(), "Artifact written");
        Ok(ArtifactRef {
            path: dest.to_path_buf(),
        })
    }

    fn release(&mut self) -> Result<(), SessionError> {
        info!(created = self.created, "Artifact session released");
        Ok(())
    }
}

/// Convert a validated entry into a lettre mailbox.
///
/// The backend may still reject an address the conservative normalizer
/// admitted; that surfaces as a per-artifact failure.
fn to_mailbox(entry: &AddressEntry) -> Result<Mailbox, String> {
    let address = entry
        .email
        .parse()
        .map_err(|e| format!("recipient {} rejected: {e}", entry.email))?;
    Ok(Mailbox::new(entry.display.clone(), address))
}
