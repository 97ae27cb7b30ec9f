//! Sample Model
//!
//! Strongly-typed inputs for every procedure in this crate:
//! - [`Sample`]: non-empty, finite observations, validated once at construction
//! - [`Categories`]: a declared support of `k` unit-width bins (die faces)
//! - [`FrequencyTable`]: observed counts per category, derived from a sample

use crate::error::StatsError;

/// An ordered, non-empty sequence of finite observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Validate and wrap observations.
    ///
    /// Fails with [`StatsError::InvalidInput`] when `values` is empty or holds
    /// a NaN or infinite value.
    pub fn new(values: Vec<f64>) -> Result<Self, StatsError> {
        if values.is_empty() {
            return Err(StatsError::invalid("sample is empty"));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(StatsError::invalid(format!(
                "sample value at position {} is not finite ({})",
                pos, values[pos]
            )));
        }
        Ok(Self { values })
    }

    /// Build a sample from integer roll outcomes.
    pub fn from_rolls<I, T>(rolls: I) -> Result<Self, StatsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        Self::new(rolls.into_iter().map(Into::into).collect())
    }

    /// Observations in recorded order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations (always >= 1)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean
    pub fn mean(&self) -> f64 {
        mean(&self.values)
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = StatsError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Sample::new(values)
    }
}

impl TryFrom<&[f64]> for Sample {
    type Error = StatsError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        Sample::new(values.to_vec())
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// A single category of a [`Categories`] support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Category {
    /// Position of the bin, 0-based
    pub index: usize,
    /// Integer label of the bin, its lower edge (the die face)
    pub label: i64,
}

/// Declared finite support of `k` equally-wide bins.
///
/// Bin `i` covers `[lowest + i, lowest + i + 1)`. For a d10 that is the ten
/// bins `[1,2), [2,3), ..., [10,11)`: every integer face falls in exactly one
/// bin and the boundary face 10 is never merged with 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Categories {
    lowest: i64,
    count: usize,
}

impl Categories {
    /// Declare `count` unit bins starting at `lowest`.
    ///
    /// Fails when `count < 2` (a single category has nothing to compare),
    /// when `count` exceeds [`MAX_CATEGORIES`](crate::MAX_CATEGORIES), or
    /// when the upper edge `lowest + count` does not fit in an `i64`.
    pub fn new(lowest: i64, count: usize) -> Result<Self, StatsError> {
        if count < 2 {
            return Err(StatsError::invalid(format!(
                "need at least 2 categories, got {count}"
            )));
        }
        if count > crate::MAX_CATEGORIES {
            return Err(StatsError::invalid(format!(
                "at most {} categories supported, got {count}",
                crate::MAX_CATEGORIES
            )));
        }
        // count <= MAX_CATEGORIES, so the cast is lossless
        if lowest.checked_add(count as i64).is_none() {
            return Err(StatsError::invalid(format!(
                "{count} categories starting at {lowest} overflow the label range"
            )));
        }
        Ok(Self { lowest, count })
    }

    /// Faces `1..=faces` of a die
    pub fn die(faces: usize) -> Result<Self, StatsError> {
        Self::new(1, faces)
    }

    /// The ten faces of a d10
    pub fn d10() -> Self {
        Self {
            lowest: 1,
            count: crate::DIE_FACES,
        }
    }

    /// Number of categories (`k`)
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether there are no categories
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Label of the first bin
    pub fn lowest(&self) -> i64 {
        self.lowest
    }

    /// Label of the last bin
    pub fn highest(&self) -> i64 {
        self.lowest + self.count as i64 - 1
    }

    /// The `k + 1` bin edges, from `lowest` to `lowest + k`
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.count)
            .map(|i| (self.lowest + i as i64) as f64)
            .collect()
    }

    /// Index of the bin containing `value`, or `None` outside the support
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        let offset = (value - self.lowest as f64).floor();
        if offset < 0.0 || offset >= self.count as f64 {
            None
        } else {
            Some(offset as usize)
        }
    }

    /// Category at `index`
    pub fn category(&self, index: usize) -> Option<Category> {
        (index < self.count).then(|| Category {
            index,
            label: self.lowest + index as i64,
        })
    }

    /// All categories in order
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        (0..self.count).filter_map(|i| self.category(i))
    }
}

/// Observed count per category.
///
/// Built once from a [`Sample`]; the counts always sum to the sample length.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    categories: Categories,
    counts: Vec<u64>,
    total: usize,
}

impl FrequencyTable {
    /// Bucket every observation of `sample` into `categories`.
    ///
    /// Fails on the first value that lies outside the declared support.
    pub fn from_sample(sample: &Sample, categories: &Categories) -> Result<Self, StatsError> {
        let mut counts = vec![0u64; categories.len()];
        for (pos, &value) in sample.values().iter().enumerate() {
            let bin = categories.bin_of(value).ok_or_else(|| {
                StatsError::invalid(format!(
                    "value {} at position {} is outside categories {}..={}",
                    value,
                    pos,
                    categories.lowest(),
                    categories.highest()
                ))
            })?;
            counts[bin] += 1;
        }

        Ok(Self {
            categories: *categories,
            counts,
            total: sample.len(),
        })
    }

    /// Categories this table was built against
    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    /// Counts in category order
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Count for one category index (0 when out of range)
    pub fn count(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.total
    }

    /// Expected count per category under equal allocation, `N / k`
    pub fn expected_uniform(&self) -> f64 {
        self.total as f64 / self.categories.len() as f64
    }

    /// `(category, count)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        self.categories.iter().zip(self.counts.iter().copied())
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
