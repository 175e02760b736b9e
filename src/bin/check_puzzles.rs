use std::process::ExitCode;

use connections::dataset::{Dataset, DatasetError};

/// Validates a puzzle file (or the bundled puzzles when no path is given) and prints a summary.
fn main() -> ExitCode {
    let path = std::env::args().nth(1);

    match load(path.as_deref()) {
        Ok(dataset) => {
            for puzzle in dataset.iter() {
                let groups: Vec<&str> = puzzle.answers.iter().map(|a| a.group.as_str()).collect();
                println!("{}  {}", puzzle.date, groups.join(" / "));
            }
            println!(
                "{} puzzles, {} to {}",
                dataset.len(),
                dataset.earliest().date,
                dataset.latest().date
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Invalid(#[from] DatasetError),
}

fn load(path: Option<&str>) -> Result<Dataset, LoadError> {
    let Some(path) = path else {
        return Ok(Dataset::embedded()?);
    };
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_string(),
        source,
    })?;
    Ok(Dataset::from_json(&json)?)
}
