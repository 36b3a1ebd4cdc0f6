// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Batch job: history → merged groups → resolved records → JSON files on disk
// role: orchestration/batch
// inputs: CollectConfig; an AvatarProbe (injected for tests, built from config for the CLI)
// outputs: Vec<ContributorRecord> (also persisted under cfg.out_dir)
// side_effects: git subprocesses, avatar probes, file writes
// invariants: Full regeneration on each run; no state carried between runs
// errors: Only storage failures propagate; everything upstream degrades to "no data"
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use anyhow::Result;

use crate::cli::CollectConfig;
use crate::history;
use crate::identity::probe::{build_probe, AvatarProbe};
use crate::identity::IdentityResolver;
use crate::model::ContributorRecord;
use crate::record;
use crate::store;

pub fn collect_with_probe(cfg: &CollectConfig, probe: &dyn AvatarProbe) -> Result<Vec<ContributorRecord>> {
  // Phase 1: history → merged groups
  let groups = history::aggregate_groups(&cfg.repo);

  // Phase 2: identity + role per group
  let resolver = IdentityResolver::new(&cfg.host, probe);
  let records = record::build_records(&groups, &resolver, cfg.threshold);

  // Phase 3: persist (fatal on failure)
  let path = store::write_records(&cfg.out_dir, &records)?;
  tracing::info!(count = records.len(), path = %path.display(), "wrote contributors");

  Ok(records)
}

pub fn run(cfg: &CollectConfig) -> Result<Vec<ContributorRecord>> {
  let probe = build_probe(&cfg.host, cfg.offline, Duration::from_secs(cfg.probe_timeout_secs));
  collect_with_probe(cfg, probe.as_ref())
}
