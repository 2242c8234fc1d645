use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn, Level};

mod cli;

use asd_composite::core::constants::FILE_NUMBER_WIDTH;
use asd_composite::{AsdError, MeasurementComposite, MeasurementFile, SetAverager, SetDescriptor};
use cli::{AlbedoArgs, Cli, Command, ReflectanceArgs, WhiteReferenceArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    let outcome = match cli.command {
        Command::Albedo(args) => albedo(args, cli.debug),
        Command::Reflectance(args) => reflectance(args, cli.debug),
        Command::WhiteReference(args) => white_reference(args, cli.debug),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        // Missing input is a user mistake, anything else is a failed run
        Err(e) if is_not_found(&e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn albedo(args: AlbedoArgs, debug: bool) -> Result<()> {
    let config = args.config(debug)?;

    let mut composite =
        MeasurementComposite::open(&args.input.input_dir, &args.input.file_prefix, config)?;
    composite.calculate().context("calculating albedo")?;

    if let Some(mean) = composite.mean() {
        println!("{mean}");
    }

    if let Some(suffix) = &args.save {
        if let Some(path) = composite.save(suffix)? {
            println!("Results saved to:\n  {}", path.display());
        }
    }

    Ok(())
}

fn reflectance(args: ReflectanceArgs, debug: bool) -> Result<()> {
    let config = args.config(debug)?;

    let mut composite =
        MeasurementComposite::open(&args.input.input_dir, &args.input.file_prefix, config)?;
    composite.calculate().context("calculating reflectance")?;

    match composite.save(&args.output_file_suffix)? {
        Some(path) => println!("Results saved to:\n  {}", path.display()),
        None => warn!("Nothing was saved"),
    }

    Ok(())
}

/// Lists each capture matching `{prefix}*.{NNN}` with its instrument and
/// band mean.
fn white_reference(args: WhiteReferenceArgs, debug: bool) -> Result<()> {
    let input_dir = &args.input.input_dir;
    if !input_dir.is_dir() {
        return Err(AsdError::DirectoryNotFound(input_dir.clone()).into());
    }

    if debug {
        info!("Processing:");
    }

    let averager = SetAverager::new(input_dir, &args.input.file_prefix, debug);
    let set = SetDescriptor::new(args.wr_index, args.wr_count);
    let mut found: u32 = 0;

    for file_index in set.file_numbers() {
        for path in averager.files_for(file_index, None)? {
            if debug {
                info!(" - {}", path.display());
            }
            print_capture(file_index, &path)?;
            found += 1;
        }
    }

    if found == 0 {
        return Err(AsdError::NoInputFiles {
            directory: input_dir.clone(),
            start_index: set.start_index,
            file_count: set.file_count,
        }
        .into());
    }
    if found != set.file_count {
        warn!(
            "Found {} white reference file(s), but {} were requested",
            found, set.file_count
        );
    }

    Ok(())
}

fn print_capture(file_index: u32, path: &Path) -> Result<()> {
    let measurement = MeasurementFile::new(path);
    let data = measurement
        .data()
        .with_context(|| format!("reading {}", path.display()))?;
    let mean = data.iter().map(|v| f64::from(*v)).sum::<f64>() / data.len() as f64;

    println!(
        "{:0width$}  {}  {:.4}",
        file_index,
        measurement.instrument()?,
        mean,
        width = FILE_NUMBER_WIDTH
    );

    Ok(())
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<AsdError>().is_some_and(AsdError::is_not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_not_found() {
        let missing = anyhow::Error::from(AsdError::NoInputFiles {
            directory: PathBuf::from("data"),
            start_index: 0,
            file_count: 10,
        })
        .context("calculating albedo");
        assert!(is_not_found(&missing));

        let corrupt = anyhow::Error::from(AsdError::CorruptedData {
            path: PathBuf::from("data/a.000"),
            expected: 8604,
            got: 4,
        });
        assert!(!is_not_found(&corrupt));
        assert!(!is_not_found(&anyhow::anyhow!("something else")));
    }
}
