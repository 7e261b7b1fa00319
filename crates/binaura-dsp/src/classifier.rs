//! Stick classification and debounce.
//!
//! A raw `(x, y)` stick reading maps to exactly one [`Sector`] through a
//! [`ThresholdTable`]. Because the analog stick is noisy, a sector is only
//! committed once [`DEBOUNCE_DEPTH`] consecutive polls agree on it.

use binaura_core::timing::DEBOUNCE_DEPTH;
use binaura_core::{Sector, ThresholdTable};
use core::cmp::Ordering;

const AXIS_MAX: u16 = 4095;

/// Map a raw stick reading to a sector. Readings above 4095 are clamped.
///
/// Front band: five sectors across `x`. Back band: far-left or far-right by
/// which side of the split `x` falls on. Everything else is `Center`.
pub fn classify(table: &ThresholdTable, x: u16, y: u16) -> Sector {
    let x = x.min(AXIS_MAX);
    let y = y.min(AXIS_MAX);

    if y > table.front_y {
        if x < table.far_left_x {
            Sector::FarLeft
        } else if x < table.left_x {
            Sector::Left
        } else if x <= table.right_x {
            Sector::Center
        } else if x <= table.far_right_x {
            Sector::Right
        } else {
            Sector::FarRight
        }
    } else if y < table.back_y {
        match x.cmp(&table.back_split_x) {
            Ordering::Less => Sector::FarLeft,
            Ordering::Greater => Sector::FarRight,
            Ordering::Equal => Sector::Center,
        }
    } else {
        Sector::Center
    }
}

/// The last `K` raw classifications, newest first.
///
/// Starts filled with an empty sentinel that never agrees with a real
/// sector, so nothing commits before `K` polls have been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceWindow<const K: usize = DEBOUNCE_DEPTH> {
    entries: [Option<Sector>; K],
}

impl<const K: usize> DebounceWindow<K> {
    pub const fn new() -> Self {
        Self { entries: [None; K] }
    }

    /// Shift `sector` in. Returns it if the whole window now agrees.
    pub fn push(&mut self, sector: Sector) -> Option<Sector> {
        if K == 0 {
            return Some(sector);
        }
        self.entries.copy_within(0..K - 1, 1);
        self.entries[0] = Some(sector);

        if self.entries.iter().all(|&entry| entry == Some(sector)) {
            Some(sector)
        } else {
            None
        }
    }

    pub fn latest(&self) -> Option<Sector> {
        self.entries.first().copied().flatten()
    }

    pub fn clear(&mut self) {
        self.entries = [None; K];
    }
}

impl<const K: usize> Default for DebounceWindow<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifier plus debounce plus the currently committed sector.
#[derive(Debug, Clone)]
pub struct DirectionClassifier<const K: usize = DEBOUNCE_DEPTH> {
    table: ThresholdTable,
    window: DebounceWindow<K>,
    committed: Sector,
}

impl<const K: usize> DirectionClassifier<K> {
    pub fn new(table: ThresholdTable, initial: Sector) -> Self {
        Self {
            table,
            window: DebounceWindow::new(),
            committed: initial,
        }
    }

    /// Classify one poll. Returns the sector only when it becomes the new
    /// committed direction.
    pub fn poll(&mut self, x: u16, y: u16) -> Option<Sector> {
        let raw = classify(&self.table, x, y);
        match self.window.push(raw) {
            Some(agreed) if agreed != self.committed => {
                self.committed = agreed;
                Some(agreed)
            }
            _ => None,
        }
    }

    pub fn committed(&self) -> Sector {
        self.committed
    }

    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }
}

impl Default for DirectionClassifier {
    fn default() -> Self {
        Self::new(ThresholdTable::DEFAULT, Sector::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    static SECTORS: [Sector; 5] = Sector::ALL;

    fn classify_default(x: u16, y: u16) -> Sector {
        classify(&ThresholdTable::DEFAULT, x, y)
    }

    #[test]
    fn test_front_band() {
        assert_eq!(classify_default(500, 3500), Sector::FarLeft);
        assert_eq!(classify_default(1200, 3500), Sector::Left);
        assert_eq!(classify_default(2048, 3500), Sector::Center);
        assert_eq!(classify_default(3300, 3500), Sector::Right);
        assert_eq!(classify_default(4000, 3500), Sector::FarRight);
    }

    #[test]
    fn test_front_band_boundaries() {
        assert_eq!(classify_default(999, 2501), Sector::FarLeft);
        assert_eq!(classify_default(1000, 2501), Sector::Left);
        assert_eq!(classify_default(1700, 2501), Sector::Center);
        assert_eq!(classify_default(3000, 2501), Sector::Center);
        assert_eq!(classify_default(3001, 2501), Sector::Right);
        assert_eq!(classify_default(3600, 2501), Sector::Right);
        assert_eq!(classify_default(3601, 2501), Sector::FarRight);
    }

    #[test]
    fn test_back_band() {
        assert_eq!(classify_default(100, 100), Sector::FarLeft);
        assert_eq!(classify_default(4095, 20), Sector::FarRight);
        assert_eq!(classify_default(2000, 1999), Sector::Center);
    }

    #[test]
    fn test_middle_band_is_center() {
        for x in [0, 1000, 2048, 4095] {
            assert_eq!(classify_default(x, 2000), Sector::Center);
            assert_eq!(classify_default(x, 2250), Sector::Center);
            assert_eq!(classify_default(x, 2500), Sector::Center);
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(classify_default(u16::MAX, u16::MAX), Sector::FarRight);
        assert_eq!(classify_default(0, u16::MAX), Sector::FarLeft);
    }

    #[test]
    fn test_debounce_commits_after_full_window() {
        let mut window = DebounceWindow::<4>::new();
        assert_eq!(window.push(Sector::Left), None);
        assert_eq!(window.push(Sector::Left), None);
        assert_eq!(window.push(Sector::Left), None);
        assert_eq!(window.push(Sector::Left), Some(Sector::Left));
        assert_eq!(window.push(Sector::Left), Some(Sector::Left));
    }

    #[test]
    fn test_debounce_rejects_single_outlier() {
        let mut window = DebounceWindow::<4>::new();
        for _ in 0..3 {
            assert_eq!(window.push(Sector::Right), None);
        }
        assert_eq!(window.push(Sector::Center), None);
        assert_eq!(window.latest(), Some(Sector::Center));
    }

    #[test]
    fn test_clear_restores_sentinel() {
        let mut window = DebounceWindow::<2>::new();
        window.push(Sector::Left);
        window.clear();
        assert_eq!(window.latest(), None);
        assert_eq!(window.push(Sector::Left), None);
    }

    #[test]
    fn test_classifier_reports_only_changes() {
        let mut classifier: DirectionClassifier = DirectionClassifier::default();
        for _ in 0..3 {
            assert_eq!(classifier.poll(500, 3500), None);
        }
        assert_eq!(classifier.poll(500, 3500), Some(Sector::FarLeft));
        assert_eq!(classifier.poll(500, 3500), None);
        assert_eq!(classifier.committed(), Sector::FarLeft);
    }

    #[test]
    fn test_classifier_ignores_commit_of_current_sector() {
        let mut classifier: DirectionClassifier = DirectionClassifier::default();
        for _ in 0..8 {
            assert_eq!(classifier.poll(2048, 2048), None);
        }
        assert_eq!(classifier.committed(), Sector::Center);
    }

    #[test]
    fn test_alternating_input_never_commits() {
        let mut classifier: DirectionClassifier = DirectionClassifier::default();
        for i in 0..100 {
            let x = if i % 2 == 0 { 100 } else { 4000 };
            assert_eq!(classifier.poll(x, 3500), None);
        }
        assert_eq!(classifier.committed(), Sector::Center);
    }

    proptest! {
        #[test]
        fn prop_classify_is_total_and_deterministic(x in 0u16..=4095, y in 0u16..=4095) {
            let a = classify_default(x, y);
            let b = classify_default(x, y);
            prop_assert_eq!(a, b);
            prop_assert!(Sector::ALL.contains(&a));
        }

        #[test]
        fn prop_front_band_is_monotonic_in_x(x in 0u16..4095, y in 2501u16..=4095) {
            prop_assert!(classify_default(x, y) <= classify_default(x + 1, y));
        }

        #[test]
        fn prop_short_runs_never_commit(
            run in proptest::sample::select(&SECTORS[..]),
            breaker in proptest::sample::select(&SECTORS[..]),
        ) {
            prop_assume!(run != breaker);
            let mut window = DebounceWindow::<4>::new();
            for _ in 0..3 {
                prop_assert_eq!(window.push(run), None);
            }
            prop_assert_eq!(window.push(breaker), None);
        }
    }
}
