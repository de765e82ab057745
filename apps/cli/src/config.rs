use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::presenter::{Tab, TonePreset};
use crate::quota::storage::{FileStore, KeyValueStore, UnavailableStore};
use crate::quota::DEFAULT_DAILY_LIMIT;

const STORAGE_FILE: &str = "storage.json";

/// Tailor a CV, cover letter and LinkedIn summary to a job description.
#[derive(Debug, Parser)]
#[command(name = "tailor", version, about)]
pub struct Cli {
    /// Base URL of the tailoring service
    #[arg(long, env = "TAILOR_ENDPOINT", default_value = "http://localhost:8080", global = true)]
    pub endpoint: String,

    /// Free generations allowed per UTC day
    #[arg(long, env = "TAILOR_DAILY_LIMIT", default_value_t = DEFAULT_DAILY_LIMIT, global = true)]
    pub daily_limit: u32,

    /// Directory holding local usage data (defaults to the platform data dir)
    #[arg(long, env = "TAILOR_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a tailored application
    Generate(GenerateArgs),
    /// Print the plain text extracted from a PDF, DOCX or TXT file
    Extract { file: PathBuf },
    /// Show how many free generations are left today
    Quota,
    /// Upgrade to unlimited generations (coming soon)
    Upgrade,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// CV file (PDF, DOCX or TXT)
    #[arg(long, conflicts_with = "cv_text", required_unless_present = "cv_text")]
    pub cv_file: Option<PathBuf>,

    /// CV pasted as text
    #[arg(long)]
    pub cv_text: Option<String>,

    /// Job description file (PDF, DOCX or TXT)
    #[arg(long, conflicts_with = "job_text", required_unless_present = "job_text")]
    pub job_file: Option<PathBuf>,

    /// Job description pasted as text
    #[arg(long)]
    pub job_text: Option<String>,

    /// Target role, e.g. "Senior ERP Manager"
    #[arg(long, default_value = "")]
    pub role: String,

    #[arg(long, value_enum, default_value_t = TonePreset::Professional)]
    pub tone: TonePreset,

    /// Which output to show
    #[arg(long, value_enum, default_value_t = Tab::Resume)]
    pub tab: Tab,

    /// Print only the raw text of the selected tab, for piping to a clipboard tool
    #[arg(long)]
    pub copy: bool,

    /// Write all three outputs as .docx files into this directory
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

impl Cli {
    /// Backing store for the quota counter. Without a resolvable data
    /// directory usage is not persisted at all.
    pub fn usage_store(&self) -> Box<dyn KeyValueStore> {
        let dir = self
            .data_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|d| d.join("resume-tailor")));
        match dir {
            Some(dir) => Box::new(FileStore::new(dir.join(STORAGE_FILE))),
            None => {
                tracing::debug!("no data directory available; usage will not be persisted");
                Box::new(UnavailableStore)
            }
        }
    }
}
