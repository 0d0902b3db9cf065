use serde::{Deserialize, Serialize};

/// Kind of turning point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremumKind {
    Peak,
    Valley,
}

impl ExtremumKind {
    /// Short prefix used in chronological labels (`p1`, `v2`).
    pub fn prefix(&self) -> char {
        match self {
            ExtremumKind::Peak => 'p',
            ExtremumKind::Valley => 'v',
        }
    }
}

/// A detected turning point.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    /// Month index, 0 = January.
    pub month: usize,
    /// Value in the mode the detector ran on (percentage or absolute).
    pub value: f64,
    pub kind: ExtremumKind,
}

impl Extremum {
    pub fn peak(month: usize, value: f64) -> Self {
        Self {
            month,
            value,
            kind: ExtremumKind::Peak,
        }
    }

    pub fn valley(month: usize, value: f64) -> Self {
        Self {
            month,
            value,
            kind: ExtremumKind::Valley,
        }
    }
}

/// Output of one detection run.
///
/// Both lists are sorted by month index, hold each month at most once and
/// never share a month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtremaSet {
    pub peaks: Vec<Extremum>,
    pub valleys: Vec<Extremum>,
}

impl ExtremaSet {
    /// Build a set from unsorted lists, sorting each by month index.
    ///
    /// A repeated month keeps its first entry. A month given as both a peak
    /// and a valley is kept as a peak only.
    pub fn new(mut peaks: Vec<Extremum>, mut valleys: Vec<Extremum>) -> Self {
        peaks.sort_by_key(|e| e.month);
        peaks.dedup_by_key(|e| e.month);
        valleys.sort_by_key(|e| e.month);
        valleys.dedup_by_key(|e| e.month);
        valleys.retain(|v| peaks.binary_search_by_key(&v.month, |p| p.month).is_err());
        Self { peaks, valleys }
    }

    /// Build a set from month indices, looking values up in `values`.
    ///
    /// Indices outside `values` are ignored.
    pub fn from_indices(values: &[f64], peaks: &[usize], valleys: &[usize]) -> Self {
        let pick = |months: &[usize], kind: ExtremumKind| -> Vec<Extremum> {
            months
                .iter()
                .filter_map(|&month| {
                    values.get(month).map(|&value| Extremum { month, value, kind })
                })
                .collect()
        };
        Self::new(pick(peaks, ExtremumKind::Peak), pick(valleys, ExtremumKind::Valley))
    }

    pub fn total(&self) -> usize {
        self.peaks.len() + self.valleys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty() && self.valleys.is_empty()
    }

    pub fn peak_months(&self) -> Vec<usize> {
        self.peaks.iter().map(|e| e.month).collect()
    }

    pub fn valley_months(&self) -> Vec<usize> {
        self.valleys.iter().map(|e| e.month).collect()
    }

    /// All extrema merged into one list ordered by month index.
    pub fn chronological(&self) -> Vec<Extremum> {
        let mut all: Vec<Extremum> = self.peaks.iter().chain(self.valleys.iter()).copied().collect();
        all.sort_by_key(|e| e.month);
        all
    }

    /// Whether any month appears as both a peak and a valley.
    pub fn has_overlap(&self) -> bool {
        self.peaks
            .iter()
            .any(|p| self.valleys.iter().any(|v| v.month == p.month))
    }
}
