//! Binary checkpoints of a training session.
//!
//! Snapshots are written as MessagePack with named fields, so a checkpoint
//! stays readable when fields are appended to the statistics or death log.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use tracing::debug;

use crate::{
    Result, error::Error, persistence::SessionSnapshot, ports::SnapshotRepository,
};

/// Checkpoint store writing one MessagePack file per snapshot.
///
/// # Examples
///
/// ```no_run
/// use civil_zones_ai::adapters::MsgPackRepository;
/// use civil_zones_ai::session::TrainingSession;
/// use civil_zones_ai::config::SessionConfig;
/// use std::path::Path;
///
/// let repo = MsgPackRepository::new();
/// let session = TrainingSession::new(SessionConfig::default());
///
/// session.checkpoint(&repo, Path::new("brain.msgpack"))?;
/// # Ok::<(), civil_zones_ai::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotRepository for MsgPackRepository {
    fn save(&self, snapshot: &SessionSnapshot, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create checkpoint {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write_named(&mut writer, snapshot).map_err(|e| {
            Error::SerializationContext {
                operation: "encode session checkpoint".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush checkpoint {path:?}"),
            source,
        })?;

        debug!(path = %path.display(), states = snapshot.table.state_count(), "wrote checkpoint");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SessionSnapshot> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open checkpoint {path:?}"),
            source,
        })?;

        rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: format!("decode session checkpoint {path:?}"),
                message: e.to_string(),
            }
        })
    }
}
