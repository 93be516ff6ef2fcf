use crate::error::{HashTableError, Result};

/// Sizing policy for a [`HashTable`](crate::HashTable).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    /// Grow (double) once `size / capacity` exceeds this.
    pub grow_load_factor: f64,
    /// Shrink (halve) once `size / capacity` drops below this.
    pub shrink_load_factor: f64,
    /// Shrinking never takes the capacity below this floor.
    pub min_capacity: usize,
    /// Print a line to stdout for every resize.
    pub report_resizes: bool,
}

impl TableConfig {
    pub const DEFAULT_CAPACITY: usize = 10;
    pub const GROW_LOAD_FACTOR: f64 = 0.75;
    pub const SHRINK_LOAD_FACTOR: f64 = 0.25;
    pub const MIN_CAPACITY: usize = 10;

    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Self::default()
        }
    }

    pub fn grow_load_factor(mut self, load_factor: f64) -> Self {
        self.grow_load_factor = load_factor;
        self
    }

    pub fn shrink_load_factor(mut self, load_factor: f64) -> Self {
        self.shrink_load_factor = load_factor;
        self
    }

    pub fn min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    pub fn report_resizes(mut self, report: bool) -> Self {
        self.report_resizes = report;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(HashTableError::InvalidCapacity(self.initial_capacity));
        }
        if self.min_capacity == 0 {
            return Err(HashTableError::InvalidConfig(
                "min_capacity must be at least 1",
            ));
        }
        if !(self.shrink_load_factor >= 0.0) {
            return Err(HashTableError::InvalidConfig(
                "shrink_load_factor must be non-negative",
            ));
        }
        // Halving at the shrink threshold must not land above the grow
        // threshold, or the table would oscillate.
        if !(self.grow_load_factor > 2.0 * self.shrink_load_factor) {
            return Err(HashTableError::InvalidConfig(
                "grow_load_factor must exceed twice shrink_load_factor",
            ));
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_CAPACITY,
            grow_load_factor: Self::GROW_LOAD_FACTOR,
            shrink_load_factor: Self::SHRINK_LOAD_FACTOR,
            min_capacity: Self::MIN_CAPACITY,
            report_resizes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TableConfig;
    use crate::error::HashTableError;

    #[test]
    fn defaults_match_documented_thresholds() {
        let config: TableConfig = TableConfig::default();
        assert_eq!(config.initial_capacity, 10);
        assert_eq!(config.grow_load_factor, 0.75);
        assert_eq!(config.shrink_load_factor, 0.25);
        assert_eq!(config.min_capacity, 10);
        assert!(!config.report_resizes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_capacity_and_overlapping_thresholds() {
        assert!(matches!(
            TableConfig::with_capacity(0).validate(),
            Err(HashTableError::InvalidCapacity(0))
        ));
        assert!(matches!(
            TableConfig::default().min_capacity(0).validate(),
            Err(HashTableError::InvalidConfig(_))
        ));
        assert!(matches!(
            TableConfig::default()
                .grow_load_factor(0.5)
                .shrink_load_factor(0.3)
                .validate(),
            Err(HashTableError::InvalidConfig(_))
        ));
        assert!(matches!(
            TableConfig::default().shrink_load_factor(f64::NAN).validate(),
            Err(HashTableError::InvalidConfig(_))
        ));
    }
}
