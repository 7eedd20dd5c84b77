//! Deploy workflow
//!
//! Refresh the tracker, stop early when nothing changed, check the API key,
//! ship the changed and added files, and only then accept the current
//! snapshot as deployed. Any failure leaves the deployed snapshot untouched.

pub mod http;
pub mod packager;

pub use http::HttpDeployService;
pub use packager::{read_bundle, Bundle, BundleEntry, BundlePackager, Packager, BUNDLE_FILE_NAME};

use crate::error::ApiError;
use crate::project::ProjectConfig;
use crate::snapshot::walker::FileIndex;
use crate::tracker::{ChangeTracker, TrackerRecord};
use crate::types::{HexHash, RelPath};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Remote side of a deploy.
pub trait DeployService {
    /// `Ok(false)` when the service rejects the key.
    fn verify_api_key(&self, api_key: &str) -> Result<bool, ApiError>;

    fn upload(&self, project: &ProjectConfig, bundle: &Path) -> Result<(), ApiError>;
}

/// What a deploy has to ship, derived from a tracker record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployPlan {
    /// Master hash of the snapshot being deployed
    pub master_hash: HexHash,
    /// Changed files first, then added ones, each with its expected hash
    pub upload: Vec<(RelPath, HexHash)>,
    pub delete: Vec<RelPath>,
    /// On-disk path per key. Keys missing here resolve under the root.
    pub sources: FileIndex,
}

impl DeployPlan {
    pub fn from_record(record: &TrackerRecord) -> Self {
        let upload = record
            .files_to_deploy()
            .into_iter()
            .filter_map(|path| {
                let hash = record.current.get(&path)?.clone();
                Some((path, hash))
            })
            .collect();
        Self {
            master_hash: record.current.master_hash.clone(),
            upload,
            delete: record.files_deleted.iter().cloned().collect(),
            sources: FileIndex::new(),
        }
    }

    pub fn with_sources(mut self, sources: FileIndex) -> Self {
        self.sources = sources;
        self
    }

    /// Where to read `rel` from, falling back to `root/rel`.
    pub fn source_path(&self, root: &Path, rel: &str) -> PathBuf {
        self.sources
            .get(rel)
            .cloned()
            .unwrap_or_else(|| root.join(rel))
    }
}

/// Result of [`deploy`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeployOutcome {
    /// Nothing changed since the last deploy; the service was not contacted.
    AlreadySynced { master_hash: HexHash },
    Deployed {
        record: TrackerRecord,
        uploaded: usize,
        deleted: usize,
    },
}

/// Run a full deploy for the tracker's workspace.
pub fn deploy(
    tracker: &ChangeTracker,
    project: &ProjectConfig,
    packager: &dyn Packager,
    service: &dyn DeployService,
) -> Result<DeployOutcome, ApiError> {
    let record = tracker.track_changes()?;
    if record.is_up_to_date() {
        info!(master_hash = %record.current.master_hash, "Already synced, nothing to deploy");
        return Ok(DeployOutcome::AlreadySynced {
            master_hash: record.current.master_hash,
        });
    }

    if !service.verify_api_key(&project.api_key)? {
        return Err(ApiError::Unauthorized(format!(
            "the deploy service rejected the API key for project '{}'",
            project.project_name
        )));
    }

    let plan = DeployPlan::from_record(&record).with_sources(tracker.locate_files()?);
    let bundle = packager.package(tracker.root(), &plan)?;
    let uploaded = service.upload(project, &bundle);
    if let Err(e) = fs::remove_file(&bundle) {
        warn!(path = %bundle.display(), "Failed to remove bundle: {}", e);
    }
    uploaded?;

    let record = tracker.mark_deployed(Utc::now())?;
    info!(
        project = %project.project_name,
        uploaded = plan.upload.len(),
        deleted = plan.delete.len(),
        "Deploy complete"
    );
    Ok(DeployOutcome::Deployed {
        record,
        uploaded: plan.upload.len(),
        deleted: plan.delete.len(),
    })
}
