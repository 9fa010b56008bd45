use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fragment::{Category, FragmentIon, IonFamily};
use crate::mass::{Mass, Tolerance};
use crate::spectrum::Peak;

/// One observation, paired with a theoretical fragment within tolerance
/// (or with nothing, if no fragment was close enough)
#[derive(Clone, Debug, PartialEq)]
pub struct MatchRecord<'f> {
    pub observed: Peak,
    pub fragment: Option<&'f FragmentIon>,
    /// Absolute mass error, in Da
    pub error: Option<f64>,
}

impl<'f> MatchRecord<'f> {
    pub fn matched(observed: Peak, fragment: &'f FragmentIon) -> Self {
        MatchRecord {
            observed,
            fragment: Some(fragment),
            error: Some((fragment.mass() - observed.mz).abs()),
        }
    }

    pub fn unmatched(observed: Peak) -> Self {
        MatchRecord {
            observed,
            fragment: None,
            error: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.fragment.is_some()
    }

    pub fn family(&self) -> Option<IonFamily> {
        self.fragment.map(FragmentIon::family)
    }

    pub fn category(&self) -> Option<Category> {
        self.fragment.map(FragmentIon::category)
    }

    pub fn label(&self) -> Option<String> {
        self.fragment.map(FragmentIon::label)
    }
}

/// Matches observed peaks against theoretical fragments
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotator {
    pub tolerance: Tolerance,
}

impl Annotator {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Annotate every observation. Each fragment within tolerance of an
    /// observation yields its own record, so one observation can produce
    /// several; an observation with no match yields a single unmatched record.
    ///
    /// Records are ordered by observed mass, then by fragment mass. Equal
    /// masses keep their input order. Neither input is modified.
    pub fn annotate<'f>(
        &self,
        fragments: &'f [FragmentIon],
        observations: &[Peak],
    ) -> Vec<MatchRecord<'f>> {
        let fragments = sorted_by_mass(fragments);
        let observations = sorted_by_mass(observations);
        observations
            .par_iter()
            .flat_map_iter(|observed| self.observe(&fragments, **observed))
            .collect()
    }

    fn observe<'f>(&self, fragments: &[&'f FragmentIon], observed: Peak) -> Vec<MatchRecord<'f>> {
        // Bound the scan with a slightly widened window, then apply the exact
        // tolerance test to each candidate
        let (lo, hi) = self.tolerance.bounds(observed.mz);
        let slack = f64::EPSILON * 4.0 * observed.mz.abs();
        let (left, right) = binary_search_slice(
            fragments,
            |fragment, bound| fragment.mass().total_cmp(bound),
            lo - slack,
            hi + slack,
        );

        let mut records = fragments[left..right]
            .iter()
            .copied()
            .filter(|fragment| self.tolerance.contains(observed.mz, fragment.mass()))
            .map(|fragment| MatchRecord::matched(observed, fragment))
            .collect::<Vec<_>>();

        if records.is_empty() {
            records.push(MatchRecord::unmatched(observed));
        }
        records
    }
}

/// Stable sort by ascending mass, without touching the input
fn sorted_by_mass<T: Mass>(items: &[T]) -> Vec<&T> {
    let mut sorted = items.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| a.monoisotopic().total_cmp(&b.monoisotopic()));
    sorted
}

/// Return the widest `left` and `right` indices into a `slice` (sorted by the
/// function `key`) such that all values between `low` and `high` are
/// contained in `slice[left..right]`
///
/// # Invariants
///
/// * `slice[left] <= low || left == 0`
/// * `slice[right] <= high && (slice[right+1] > high || right == slice.len())`
/// * `0 <= left <= right <= slice.len()`
#[inline]
pub fn binary_search_slice<T, F, S>(slice: &[T], key: F, low: S, high: S) -> (usize, usize)
where
    F: Fn(&T, &S) -> Ordering,
{
    let left_idx = match slice.binary_search_by(|a| key(a, &low)) {
        Ok(idx) | Err(idx) => {
            let mut idx = idx.saturating_sub(1);
            while idx > 0 && key(&slice[idx], &low) != Ordering::Less {
                idx -= 1;
            }
            idx
        }
    };

    let right_idx = match slice[left_idx..].binary_search_by(|a| key(a, &high)) {
        Ok(idx) | Err(idx) => {
            let mut idx = idx + left_idx;
            while idx < slice.len() && key(&slice[idx], &high) != Ordering::Greater {
                idx = idx.saturating_add(1);
            }
            idx.min(slice.len())
        }
    };
    (left_idx, right_idx)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crosslink::{Crosslink, Side};
    use crate::fragment::{Common, Diagnostic, Immonium, Precursor};
    use crate::fragmenter::Fragmenter;
    use crate::ion_series::Kind;

    fn peak(mz: f64) -> Peak {
        Peak {
            mz,
            intensity: 100.0,
        }
    }

    fn labels(records: &[MatchRecord]) -> Vec<Option<String>> {
        records.iter().map(MatchRecord::label).collect()
    }

    #[test]
    fn binary_search_slice_smoke() {
        let data = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];
        let bounds = binary_search_slice(&data, |a: &f64, b| a.total_cmp(b), 1.75, 3.5);
        assert_eq!(bounds, (1, 6));
        assert_eq!(&data[bounds.0..bounds.1], &[1.5, 2.0, 2.5, 3.0, 3.5]);

        let bounds = binary_search_slice(&data, |a: &f64, b| a.total_cmp(b), 0.0, 5.0);
        assert_eq!(bounds, (0, data.len()));

        let empty: [f64; 0] = [];
        assert_eq!(
            binary_search_slice(&empty, |a: &f64, b| a.total_cmp(b), 0.0, 5.0),
            (0, 0)
        );
    }

    #[test]
    fn ppm_window_is_inclusive_of_neighbours() {
        let fragment = FragmentIon::Common(Common::new(Side::Alpha, Kind::B, "PEP").unwrap());
        let mass = fragment.mass();
        let fragments = vec![fragment];
        let annotator = Annotator::default();

        let inside = annotator.annotate(&fragments, &[peak(mass * (1.0 + 9.9e-6))]);
        assert_eq!(inside.len(), 1);
        assert!(inside[0].is_match());
        assert!(inside[0].error.unwrap() < annotator.tolerance.window(inside[0].observed.mz));

        let outside = annotator.annotate(&fragments, &[peak(mass * (1.0 + 10.1e-6))]);
        assert_eq!(outside, vec![MatchRecord::unmatched(peak(mass * (1.0 + 10.1e-6)))]);
    }

    #[test]
    fn absolute_window_is_half_width() {
        let fragment = FragmentIon::Diagnostic(Diagnostic::new("DI_1").unwrap());
        let fragments = vec![fragment];
        let annotator = Annotator::new(Tolerance::Da(0.2));

        let records = annotator.annotate(&fragments, &[peak(139.17), peak(139.19), peak(138.99)]);
        // 0.2 Da wide window: +/- 0.1 Da around each observation
        let mz = records.iter().map(|r| r.observed.mz).collect::<Vec<_>>();
        assert_eq!(mz, vec![138.99, 139.17, 139.19]);
        assert_eq!(
            labels(&records),
            vec![Some("DI_1".into()), Some("DI_1".into()), None]
        );
    }

    #[test]
    fn every_fragment_in_window_is_reported() {
        // I and L share a mass, so both immonium ions match a single peak
        let fragments = vec![
            FragmentIon::Immonium(Immonium::new(b'L').unwrap()),
            FragmentIon::Diagnostic(Diagnostic::new("DI_2").unwrap()),
            FragmentIon::Immonium(Immonium::new(b'I').unwrap()),
        ];
        let records = Annotator::default().annotate(&fragments, &[peak(86.09698)]);
        assert_eq!(
            labels(&records),
            vec![Some("IM_L".to_string()), Some("IM_I".to_string())]
        );
        assert!(records.iter().all(|r| r.error == Some(0.0)));
    }

    #[test]
    fn unmatched_observations_are_kept() {
        let fragments = vec![FragmentIon::Diagnostic(Diagnostic::new("DI_2").unwrap())];
        let observations = vec![peak(500.0), peak(222.15), peak(10.0)];
        let records = Annotator::default().annotate(&fragments, &observations);

        // Sorted by observed mass
        let mz = records.iter().map(|r| r.observed.mz).collect::<Vec<_>>();
        assert_eq!(mz, vec![10.0, 222.15, 500.0]);
        assert_eq!(labels(&records), vec![None, Some("DI_2".into()), None]);
        assert_eq!(records[0].error, None);
        assert_eq!(records[0].category(), None);
        assert_eq!(records[1].category(), Some(Category::Diagnostic));

        assert!(Annotator::default().annotate(&[], &observations).iter().all(|r| !r.is_match()));
        assert!(Annotator::default().annotate(&fragments, &[]).is_empty());
    }

    #[test]
    fn inputs_are_untouched() {
        let xl = "DTHKSEIAHR-FKDLGEEHFK-a4-b2".parse::<Crosslink>().unwrap();
        let fragments = Fragmenter::new(&xl).fragments().unwrap();
        let observations = vec![peak(900.0), peak(139.08), peak(400.0), peak(222.15)];
        let (f, o) = (fragments.clone(), observations.clone());

        let records = Annotator::default().annotate(&fragments, &observations);
        assert_eq!(fragments, f);
        assert_eq!(observations, o);
        for observed in &observations {
            assert!(records.iter().any(|r| r.observed == *observed));
        }
    }

    #[test]
    fn precursor_matches_exactly() {
        let precursor = FragmentIon::Precursor(Precursor::new("AK", "AK").unwrap());
        let mass = precursor.mass();
        let fragments = vec![precursor];
        let records = Annotator::default().annotate(&fragments, &[peak(mass)]);
        assert_eq!(records, vec![MatchRecord::matched(peak(mass), &fragments[0])]);
        assert_eq!(records[0].error, Some(0.0));
        assert_eq!(records[0].family(), Some(IonFamily::Precursor));
        assert_eq!(records[0].category(), Some(Category::Crosslink));
    }
}
