use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use annotatexl_core::annotator::{Annotator, MatchRecord};
use annotatexl_core::crosslink::Crosslink;
use annotatexl_core::fragmenter::Fragmenter;
use annotatexl_core::spectrum::{deduplicate, Peak};
use anyhow::{anyhow, Context};
use log::info;

use super::input::Search;

/// Read a `m/z, intensity` peak list. The first row is a header; columns past
/// the second are ignored.
pub fn read_peak_list<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Peak>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    let mut peaks = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row = row?;
        // Header is line 1
        let line = idx + 2;
        let field = |col: usize, name: &str| -> anyhow::Result<f64> {
            let value = row
                .get(col)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow!("line {line}: missing {name}"))?;
            value
                .parse::<f64>()
                .with_context(|| format!("line {line}: invalid {name} `{value}`"))
        };
        peaks.push(Peak {
            mz: field(0, "m/z")?,
            intensity: field(1, "intensity")?,
        });
    }
    Ok(peaks)
}

pub struct Runner {
    pub parameters: Search,
    pub crosslink: Crosslink,
    start: Instant,
}

impl Runner {
    pub fn new(parameters: Search) -> anyhow::Result<Self> {
        let start = Instant::now();
        let crosslink = parameters.crosslink.parse::<Crosslink>().with_context(|| {
            format!("Invalid cross-link identifier `{}`", parameters.crosslink)
        })?;
        Ok(Self {
            parameters,
            crosslink,
            start,
        })
    }

    // Create a path for `file_name` in the specified output directory
    pub(crate) fn make_path<S: AsRef<Path>>(&self, file_name: S) -> PathBuf {
        self.parameters.output_directory.join(file_name)
    }

    pub fn run(mut self) -> anyhow::Result<Search> {
        let fragments = Fragmenter::new(&self.crosslink).fragments()?;
        info!(
            "generated {} theoretical fragments for {}",
            fragments.len(),
            self.crosslink
        );

        let raw = read_peak_list(&self.parameters.peak_list).with_context(|| {
            format!("Failed to read peak list `{}`", self.parameters.peak_list)
        })?;
        let read = raw.len();
        let peaks = deduplicate(raw);
        info!(
            "read {} peaks from `{}` ({} duplicate m/z dropped)",
            peaks.len(),
            self.parameters.peak_list,
            read - peaks.len()
        );

        let annotator = Annotator::new(self.parameters.tolerance);
        let records = annotator.annotate(&fragments, &peaks);
        info!(
            "matched {} of {} peaks ({} annotations)",
            matched_peaks(&records),
            peaks.len(),
            records.iter().filter(|r| r.is_match()).count()
        );

        let mut output_paths = vec![
            self.write_annotations(&records)?,
            self.write_spectrum(&records)?,
        ];
        if self.parameters.write_fragments {
            output_paths.push(self.write_fragments(&fragments)?);
        }
        for path in &output_paths {
            info!("wrote {}", path);
        }
        self.parameters.output_paths = output_paths;

        println!("{}", serde_json::to_string_pretty(&self.parameters)?);
        info!("finished in {}ms", self.start.elapsed().as_millis());
        Ok(self.parameters)
    }
}

/// Number of distinct observations with at least one annotation
fn matched_peaks(records: &[MatchRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.is_match())
        .map(|r| r.observed.mz.to_bits())
        .collect::<HashSet<_>>()
        .len()
}
