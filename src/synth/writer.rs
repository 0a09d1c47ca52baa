//! Host record emission.
//!
//! Records are written either as indented JSON objects or one compact JSON
//! object per line. Hosts are synthesized and written a subnet at a time so
//! large networks never sit fully in memory.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use color_eyre::eyre::{Result, WrapErr};
use log::{debug, info};
use rand::Rng;
use tempfile::NamedTempFile;

use super::{synthesize_subnet, SynthError};
use crate::ip::IpLayout;
use crate::topology::Allocation;

/// Output name for a run started now, e.g. "20170803-142501.json"
pub fn default_output_name() -> PathBuf {
    PathBuf::from(format!("{}.json", Local::now().format("%Y%m%d-%H%M%S")))
}

/// Synthesize every host in `allocation` and write it to `out`.
///
/// Returns the number of records written.
pub fn write_hosts<W: Write, R: Rng + ?Sized>(
    out: &mut W,
    allocation: &Allocation,
    layout: IpLayout,
    pretty: bool,
    rng: &mut R,
) -> Result<usize, SynthError> {
    let mut written = 0;
    for subnet in &allocation.subnets {
        for host in synthesize_subnet(subnet, layout, rng)? {
            if pretty {
                serde_json::to_writer_pretty(&mut *out, &host)?;
            } else {
                serde_json::to_writer(&mut *out, &host)?;
            }
            out.write_all(b"\n")?;
            written += 1;
        }
        debug!("Wrote {} hosts for {}", subnet.placed(), subnet.netmask);
    }
    Ok(written)
}

/// Write the allocation's hosts to a file at `path`, replacing any existing file.
///
/// Records go to a temporary file next to `path`, which only takes the
/// final name once every record is written and flushed. A failed run leaves
/// no partial file behind.
pub fn write_hosts_to_file<R: Rng + ?Sized>(
    path: &Path,
    allocation: &Allocation,
    layout: IpLayout,
    pretty: bool,
    rng: &mut R,
) -> Result<usize> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staging = NamedTempFile::new_in(dir)
        .wrap_err_with(|| format!("Failed to create output file '{}'", path.display()))?;
    let mut out = BufWriter::new(staging);

    let written = write_hosts(&mut out, allocation, layout, pretty, rng)
        .wrap_err_with(|| format!("Failed to write hosts to '{}'", path.display()))?;
    let staging = out
        .into_inner()
        .map_err(|e| e.into_error())
        .wrap_err_with(|| format!("Failed to flush '{}'", path.display()))?;
    staging
        .persist(path)
        .map_err(|e| e.error)
        .wrap_err_with(|| format!("Failed to save output file '{}'", path.display()))?;

    info!("Wrote {} host records to {}", written, path.display());
    Ok(written)
}
