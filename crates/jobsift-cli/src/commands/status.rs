//! Status command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use jobsift_pipeline::inspect;

/// Execute the status command.
pub fn execute_status(config: &Config, formatter: &Formatter) -> Result<()> {
    let pipeline_config = config.pipeline_config(None);
    let status = inspect(&pipeline_config)?;

    let mut paths = vec![
        ("Input", pipeline_config.input.display().to_string()),
        ("Output", pipeline_config.output.display().to_string()),
    ];
    if let Some(queue) = &pipeline_config.queue {
        paths.push(("Queue", queue.display().to_string()));
    }
    paths.push(("Archive", pipeline_config.archive_dir.display().to_string()));
    paths.push(("Provider", format!("{} ({})", config.extraction.provider, config.extraction.model)));

    println!("{}", formatter.format_status(&paths, &status));
    Ok(())
}
