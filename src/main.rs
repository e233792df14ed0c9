use clap::Parser;
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use toml_patcher::{
    DeleteKeyPatch, DeleteSectionPatch, PatchBatch, PatchError, SetPatch, TomlDocument,
};

#[derive(Parser)]
#[command(name = "toml-patcher")]
#[command(
    about = "Apply precise value changes to a TOML config without disturbing its formatting",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Input TOML path
    input: PathBuf,

    /// Output TOML path (may equal the input for in-place patching)
    output: PathBuf,

    /// Repeatable. 'path = TOML_VALUE [# inline comment]', e.g.
    /// --set 'logger.stdout_level = 6 # disable'
    /// --set 'servers[0].host = "localhost"'
    #[arg(long = "set", value_name = "EXPR")]
    sets: Vec<String>,

    /// Repeatable. Delete a single key by dotted path, e.g.
    /// --delete-key 'logger.file_level'
    #[arg(long = "delete-key", value_name = "PATH")]
    delete_keys: Vec<String>,

    /// Repeatable. Delete a section (non-recursive); arrays of tables
    /// require an explicit index, e.g. 'servers[2]'
    #[arg(long = "delete-section", value_name = "PATH")]
    delete_sections: Vec<String>,

    /// Replace or create the top-of-file comment block (newlines preserved)
    #[arg(long = "top-comment", value_name = "TEXT")]
    top_comment: Option<String>,

    /// Show a unified diff of the changes
    #[arg(short, long)]
    diff: bool,

    /// Resolve and apply everything in memory but do not write the output
    #[arg(short = 'n', long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red(), err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), PatchError> {
    let text = fs::read_to_string(&cli.input).map_err(|err| PatchError::UnreadableInput {
        message: format!("{}: {}", cli.input.display(), err),
    })?;

    // Payload errors surface before any resolution work.
    let batch = build_batch(cli)?;

    let mut document = TomlDocument::parse(&text)?;
    document.apply(&batch)?;
    let patched = document.to_text();

    if cli.diff && patched != text {
        display_diff(&cli.input, &text, &patched);
    }

    if cli.dry_run {
        println!("{}", "[dry run] output not written".cyan());
        return Ok(());
    }

    write_output(&cli.output, &patched)
}

fn build_batch(cli: &Cli) -> Result<PatchBatch, PatchError> {
    let mut batch = PatchBatch {
        top_comment: cli.top_comment.clone(),
        ..PatchBatch::default()
    };
    for spec in &cli.sets {
        batch.sets.push(SetPatch::parse(spec)?);
    }
    for spec in &cli.delete_keys {
        batch.delete_keys.push(DeleteKeyPatch::parse(spec)?);
    }
    for spec in &cli.delete_sections {
        batch.delete_sections.push(DeleteSectionPatch::parse(spec)?);
    }
    Ok(batch)
}

/// Atomic write: tempfile in the target directory, fsync, rename. Either
/// the full write succeeds or the previous file is left intact.
fn write_output(path: &Path, content: &str) -> Result<(), PatchError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let result = (|| {
        let mut temp = tempfile::NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|err| err.error)?;
        Ok::<(), std::io::Error>(())
    })();

    result.map_err(|err| PatchError::UnwritableOutput {
        message: format!("{}: {}", path.display(), err),
    })
}

/// Show a unified diff between the original and patched document.
fn display_diff(file: &Path, original: &str, patched: &str) {
    println!("{}", format!("--- {} (original)", file.display()).dimmed());
    println!("{}", format!("+++ {} (patched)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, patched);
    for change in diff.iter_all_changes() {
        let line = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", line);
    }
}
