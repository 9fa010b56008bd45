use std::path::{Path, PathBuf};

use annotatexl_core::crosslink::Crosslink;
use annotatexl_core::mass::Tolerance;
use anyhow::{ensure, Context};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone, Debug)]
/// Actual annotation parameters - may include overrides or default values not set by user
pub struct Search {
    pub version: String,
    pub crosslink: String,
    pub peak_list: String,
    pub tolerance: Tolerance,
    pub write_fragments: bool,
    pub output_paths: Vec<String>,

    #[serde(skip_serializing)]
    pub output_directory: PathBuf,
}

#[derive(Deserialize, Default, Debug)]
/// Input parameters deserialized from an optional JSON file
pub struct Input {
    crosslink: Option<String>,
    peak_list: Option<String>,
    tolerance: Option<Tolerance>,
    output_directory: Option<String>,
    write_fragments: Option<bool>,
}

impl Input {
    pub fn from_arguments(matches: ArgMatches) -> anyhow::Result<Self> {
        let mut input = match matches.get_one::<String>("parameters") {
            Some(path) => Input::load(path)
                .with_context(|| format!("Failed to read parameters from `{path}`"))?,
            None => Input::default(),
        };

        // Handle JSON configuration overrides
        if let Some(crosslink) = matches.get_one::<String>("crosslink") {
            log::trace!("overriding `crosslink` parameter.");
            input.crosslink = Some(crosslink.into());
        }
        if let Some(peak_list) = matches.get_one::<String>("peak_list") {
            log::trace!("overriding `peak_list` parameter.");
            input.peak_list = Some(peak_list.into());
        }
        if let Some(ppm) = matches.get_one::<f64>("ppm").copied() {
            log::trace!("overriding `tolerance` parameter with {ppm} ppm.");
            input.tolerance = Some(Tolerance::Ppm(ppm));
        }
        if let Some(da) = matches.get_one::<f64>("absolute").copied() {
            log::trace!("overriding `tolerance` parameter with {da} Da.");
            input.tolerance = Some(Tolerance::Da(da));
        }
        if let Some(output_directory) = matches.get_one::<String>("output_directory") {
            log::trace!("overriding `output_directory` parameter.");
            input.output_directory = Some(output_directory.into());
        }
        if matches.get_flag("fragments") {
            input.write_fragments = Some(true);
        }

        ensure!(
            input.crosslink.is_some(),
            "`crosslink` must be set. For more information try '--help'"
        );
        ensure!(
            input.peak_list.is_some(),
            "`peak_list` must be set. For more information try '--help'"
        );

        Ok(input)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    fn check_tolerance(tolerance: &Tolerance) {
        match *tolerance {
            Tolerance::Ppm(ppm) if ppm <= 0.0 => {
                log::warn!("Non-positive tolerance of {} ppm will not match any peak", ppm)
            }
            Tolerance::Ppm(ppm) if ppm > 50.0 => {
                log::warn!("Tolerance of {} ppm is wider than expected", ppm)
            }
            Tolerance::Da(da) if da <= 0.0 => {
                log::warn!("Non-positive tolerance of {} Da will not match any peak", da)
            }
            Tolerance::Da(da) if da > 1.0 => {
                log::warn!("Tolerance of {} Da is wider than expected", da)
            }
            _ => {}
        }
    }

    pub fn build(self) -> anyhow::Result<Search> {
        let crosslink = self
            .crosslink
            .context("'crosslink' must be provided!")?;
        let peak_list = self
            .peak_list
            .context("'peak_list' must be provided!")?;

        // Fail early, before anything is read or written
        crosslink
            .parse::<Crosslink>()
            .with_context(|| format!("Invalid cross-link identifier `{crosslink}`"))?;

        let tolerance = self.tolerance.unwrap_or_default();
        Self::check_tolerance(&tolerance);

        // Results are written next to the peak list, unless told otherwise
        let output_directory = match self.output_directory {
            Some(path) => PathBuf::from(path),
            None => match Path::new(&peak_list).parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => std::env::current_dir()?,
            },
        };
        std::fs::create_dir_all(&output_directory).with_context(|| {
            format!(
                "Failed to create output directory `{}`",
                output_directory.display()
            )
        })?;

        Ok(Search {
            version: clap::crate_version!().into(),
            crosslink,
            peak_list,
            tolerance,
            write_fragments: self.write_fragments.unwrap_or(false),
            output_paths: Vec::new(),
            output_directory,
        })
    }
}
