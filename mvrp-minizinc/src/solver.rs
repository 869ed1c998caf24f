use anyhow::{anyhow, Result};
use mvrp_instance::{Instance, RoutingSolution};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::dzn::instance_dzn;
use crate::model::CVRP_MODEL;

pub const SOLUTION_SEP: &str = "----------";
pub const COMPLETE_MARKER: &str = "==========";
pub const UNSAT_MARKER: &str = "=====UNSATISFIABLE=====";
pub const UNKNOWN_MARKER: &str = "=====UNKNOWN=====";
pub const ERROR_MARKER: &str = "=====ERROR=====";

/// How the solver's transcript ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Search completed and the last solution is optimal.
    Optimal,
    /// At least one solution was found but optimality was not proven.
    Satisfied,
    Unsatisfiable,
    Unknown,
    Error,
}

#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub solution: Option<RoutingSolution>,
}

/// Handle to an external MiniZinc toolchain and a solver tag to run the
/// model with.
pub struct Minizinc {
    binary: PathBuf,
    solver_tag: String,
}

impl Minizinc {
    /// Resolves the toolchain up front; a missing binary fails here,
    /// before any model is written.
    pub fn lookup(binary: impl Into<PathBuf>, solver_tag: impl Into<String>) -> Result<Self> {
        let binary = binary.into();
        let probe = Command::new(&binary)
            .arg("--version")
            .output()
            .map_err(|e| anyhow!("cannot run {}: {}", binary.display(), e))?;
        if !probe.status.success() {
            return Err(anyhow!(
                "{} --version failed: {}",
                binary.display(),
                String::from_utf8_lossy(&probe.stderr).trim()
            ));
        }
        Ok(Self {
            binary,
            solver_tag: solver_tag.into(),
        })
    }

    /// Stages the model and data in a scratch directory, runs the solver
    /// to completion, and parses the best solution it printed.
    pub fn solve(&self, instance: &Instance) -> Result<RoutingSolution> {
        let scratch = scratch_dir()?;
        let model_path = scratch.join("cvrp.mzn");
        let data_path = scratch.join("instance.dzn");
        fs::write(&model_path, CVRP_MODEL)?;
        fs::write(&data_path, instance_dzn(instance))?;

        let output = Command::new(&self.binary)
            .arg("--solver")
            .arg(&self.solver_tag)
            .arg("--output-mode")
            .arg("json")
            .arg(&model_path)
            .arg(&data_path)
            .output()
            .map_err(|e| anyhow!("failed to run {}: {}", self.binary.display(), e));
        let _ = fs::remove_dir_all(&scratch);
        let output = output?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(anyhow!(
                "solver exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }
        let outcome = parse_transcript(&String::from_utf8_lossy(&output.stdout))?;
        match outcome.status {
            SolveStatus::Optimal | SolveStatus::Satisfied => outcome
                .solution
                .ok_or_else(|| anyhow!("solver reported success without a solution")),
            SolveStatus::Unsatisfiable => {
                Err(anyhow!("no feasible routing exists for this instance"))
            }
            SolveStatus::Unknown => Err(anyhow!("solver finished without finding a solution")),
            SolveStatus::Error => Err(anyhow!("solver error: {}", stderr.trim())),
        }
    }
}

/// Splits a solver transcript into solution blocks and a final status.
/// Blocks end with a `----------` line; the last block is the best
/// solution found when minimizing.
pub fn parse_transcript(transcript: &str) -> Result<SolveOutcome> {
    let mut blocks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut marker = None;
    for line in transcript.lines() {
        match line.trim() {
            SOLUTION_SEP => blocks.push(std::mem::take(&mut current)),
            COMPLETE_MARKER => marker = Some(SolveStatus::Optimal),
            UNSAT_MARKER => marker = Some(SolveStatus::Unsatisfiable),
            UNKNOWN_MARKER => marker = Some(SolveStatus::Unknown),
            ERROR_MARKER => marker = Some(SolveStatus::Error),
            _ => {
                current.push_str(line);
                current.push('\n');
            }
        }
    }
    let status = match marker {
        Some(status) => status,
        None if blocks.is_empty() => SolveStatus::Unknown,
        None => SolveStatus::Satisfied,
    };
    let solution = match blocks.last() {
        Some(block) => Some(
            serde_json::from_str::<RoutingSolution>(block.trim())
                .map_err(|e| anyhow!("malformed solution block: {}", e))?,
        ),
        None => None,
    };
    Ok(SolveOutcome { status, solution })
}

fn scratch_dir() -> Result<PathBuf> {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
    let dir = std::env::temp_dir().join(format!("mvrp-{}-{}", std::process::id(), nanos));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
