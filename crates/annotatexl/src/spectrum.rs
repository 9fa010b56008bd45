use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::annotator::MatchRecord;
use crate::fragment::Category;
use crate::mass::Mass;

/// An observed peak, as read from a peak list
#[derive(PartialEq, PartialOrd, Copy, Clone, Default, Debug, Serialize, Deserialize)]
pub struct Peak {
    pub mz: f64,
    pub intensity: f64,
}

impl Mass for Peak {
    fn monoisotopic(&self) -> f64 {
        self.mz
    }
}

/// Collapse peaks sharing the exact same m/z, keeping the first occurrence
pub fn deduplicate(peaks: Vec<Peak>) -> Vec<Peak> {
    peaks.into_iter().unique_by(|peak| peak.mz.to_bits()).collect()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlotPeak {
    pub mz: f64,
    /// Relative intensity, in percent of the intensity range
    pub intensity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Annotated peaks grouped by ion category, ready for plotting.
///
/// An observation matching several fragments appears once per match, so it
/// may show up under more than one category.
#[derive(Serialize, Default, Debug, Clone, PartialEq)]
pub struct SpectrumView {
    pub unmatched: Vec<PlotPeak>,
    pub crosslink: Vec<PlotPeak>,
    pub common: Vec<PlotPeak>,
    pub diagnostic: Vec<PlotPeak>,
    pub immonium: Vec<PlotPeak>,
}

impl SpectrumView {
    pub fn new(records: &[MatchRecord<'_>]) -> Self {
        let (min, max) = records
            .iter()
            .map(|record| record.observed.intensity)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                (lo.min(x), hi.max(x))
            });
        let range = max - min;
        let normalize = |intensity: f64| {
            if range > 0.0 {
                (intensity - min) / range * 100.0
            } else {
                100.0
            }
        };

        let mut view = SpectrumView::default();
        for record in records {
            let peak = PlotPeak {
                mz: record.observed.mz,
                intensity: normalize(record.observed.intensity),
                label: record.label(),
            };
            let bin = match record.category() {
                None => &mut view.unmatched,
                Some(Category::Crosslink) => &mut view.crosslink,
                Some(Category::Common) => &mut view.common,
                Some(Category::Diagnostic) => &mut view.diagnostic,
                Some(Category::Immonium) => &mut view.immonium,
            };
            bin.push(peak);
        }
        view
    }

    pub fn len(&self) -> usize {
        self.unmatched.len()
            + self.crosslink.len()
            + self.common.len()
            + self.diagnostic.len()
            + self.immonium.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crosslink::Side;
    use crate::fragment::{Common, Diagnostic, FragmentIon, Precursor};
    use crate::ion_series::Kind;

    fn peak(mz: f64, intensity: f64) -> Peak {
        Peak { mz, intensity }
    }

    #[test]
    fn first_occurrence_wins() {
        let peaks = vec![
            peak(100.0, 1.0),
            peak(200.0, 2.0),
            peak(100.0, 3.0),
            peak(300.0, 4.0),
            peak(200.0, 5.0),
        ];
        assert_eq!(
            deduplicate(peaks),
            vec![peak(100.0, 1.0), peak(200.0, 2.0), peak(300.0, 4.0)]
        );
        assert!(deduplicate(Vec::new()).is_empty());
    }

    #[test]
    fn categorised_view() {
        let common = FragmentIon::Common(Common::new(Side::Alpha, Kind::B, "PEP").unwrap());
        let precursor = FragmentIon::Precursor(Precursor::new("AK", "AK").unwrap());
        let diagnostic = FragmentIon::Diagnostic(Diagnostic::new("DI_1").unwrap());
        let records = vec![
            MatchRecord::unmatched(peak(50.0, 10.0)),
            MatchRecord::matched(peak(139.08, 20.0), &diagnostic),
            MatchRecord::matched(peak(324.16, 30.0), &common),
            MatchRecord::matched(peak(573.36, 110.0), &precursor),
        ];

        let view = SpectrumView::new(&records);
        assert_eq!(view.len(), 4);
        assert_eq!(view.unmatched, vec![PlotPeak { mz: 50.0, intensity: 0.0, label: None }]);
        assert_eq!(view.diagnostic[0].label.as_deref(), Some("DI_1"));
        assert!((view.diagnostic[0].intensity - 10.0).abs() < 1e-9);
        assert_eq!(view.common[0].label.as_deref(), Some("Ab3"));
        assert_eq!(view.crosslink[0].label.as_deref(), Some("A2-B2"));
        assert_eq!(view.crosslink[0].intensity, 100.0);
        assert!(view.immonium.is_empty());
    }

    #[test]
    fn flat_intensities() {
        let records = vec![
            MatchRecord::unmatched(peak(50.0, 7.0)),
            MatchRecord::unmatched(peak(60.0, 7.0)),
        ];
        let view = SpectrumView::new(&records);
        assert!(view.unmatched.iter().all(|peak| peak.intensity == 100.0));
        assert!(SpectrumView::new(&[]).is_empty());
    }

    #[test]
    fn serialize_view() {
        let records = vec![MatchRecord::unmatched(peak(50.0, 7.0))];
        let json = serde_json::to_value(SpectrumView::new(&records)).unwrap();
        assert_eq!(json["unmatched"][0]["mz"], 50.0);
        assert!(json["unmatched"][0].get("label").is_none());
        assert!(json["crosslink"].as_array().unwrap().is_empty());
    }
}
